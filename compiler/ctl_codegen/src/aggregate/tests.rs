use ctl_ir::{ExprId, ExprRange, ModuleId, TypeId};
use pretty_assertions::assert_eq;

use super::*;
use crate::config::CodegenConfig;
use crate::context::EmissionTables;
use crate::test_helpers::Fixture;

fn floats(fx: &mut Fixture, values: &[f32]) -> ExprRange {
    let ids: Vec<ExprId> = values.iter().map(|&v| fx.float(v)).collect();
    fx.program.arena.alloc_expr_list(ids)
}

fn run<R>(
    fx: &Fixture,
    module: ModuleId,
    f: impl FnOnce(&mut CodegenContext<'_>) -> R,
) -> R {
    let config = CodegenConfig::legacy();
    let mut tables = EmissionTables::default();
    fx.with_context(&config, &mut tables, module, f).0
}

#[test]
fn access_path_renders_steps() {
    let path = AccessPath::new("m").index(2).member("x").index(1);
    assert_eq!(path.to_string(), "m[2].x[1]");
    assert!(!path.is_root());
    assert!(AccessPath::new("m").is_root());
}

#[test]
fn native_vector_direct_is_constructor() {
    let mut fx = Fixture::new();
    let module = fx.module("Foo");
    let ty = fx.array(TypeId::FLOAT, 3);
    let elements = floats(&mut fx, &[1.0, 2.0, 3.0]);

    let text = run(&fx, module, |ctx| lower_direct(ctx, ty, elements, "v")).unwrap();
    assert_eq!(text, "Imath::V3f( 1.0, 2.0, 3.0 )");
}

#[test]
fn long_lists_go_one_element_per_line() {
    let mut fx = Fixture::new();
    let module = fx.module("Foo");
    let ty = fx.array(TypeId::FLOAT, 5);
    let elements = floats(&mut fx, &[1.0, 2.0, 3.0, 4.0, 5.0]);

    let text = run(&fx, module, |ctx| lower_direct(ctx, ty, elements, "t")).unwrap();
    assert_eq!(text, "{\n    1.0,\n    2.0,\n    3.0,\n    4.0,\n    5.0\n}");
}

#[test]
fn deferred_struct_assigns_native_members_whole() {
    let mut fx = Fixture::new();
    let module = fx.module("Foo");
    let v3 = fx.array(TypeId::FLOAT, 3);
    let ty = fx.struct_def(module, "S", &[("v", v3), ("n", TypeId::INT)]);
    let mut ids: Vec<ExprId> = [1.0, 2.0, 3.0].iter().map(|&v| fx.float(v)).collect();
    ids.push(fx.int(4));
    let elements = fx.program.arena.alloc_expr_list(ids);

    let statements = run(&fx, module, |ctx| lower_deferred(ctx, ty, elements, "s")).unwrap();
    assert_eq!(
        statements,
        vec![
            "s.v = Imath::V3f( 1.0, 2.0, 3.0 );".to_string(),
            "s.n = 4;".to_string(),
        ]
    );
}

#[test]
fn deferred_matrix_goes_element_by_element() {
    let mut fx = Fixture::new();
    let module = fx.module("Foo");
    let row = fx.array(TypeId::FLOAT, 3);
    let ty = fx.array(row, 3);
    let elements = floats(&mut fx, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    let statements = run(&fx, module, |ctx| lower_deferred(ctx, ty, elements, "m")).unwrap();
    assert_eq!(statements.len(), 9);
    assert_eq!(statements[0], "m[0][0] = 1.0;");
    assert_eq!(statements[5], "m[1][2] = 0.0;");
    assert_eq!(statements[8], "m[2][2] = 1.0;");
}

#[test]
fn deferred_container_is_resized_first() {
    let mut fx = Fixture::new();
    let module = fx.module("Foo");
    let s = fx.struct_def(module, "S", &[("a", TypeId::INT)]);
    let ty = fx.array(s, 2);
    let ids = vec![fx.int(1), fx.int(2)];
    let elements = fx.program.arena.alloc_expr_list(ids);

    let statements = run(&fx, module, |ctx| lower_deferred(ctx, ty, elements, "arr")).unwrap();
    assert_eq!(
        statements,
        vec![
            "arr.resize( 2 );".to_string(),
            "arr[0].a = 1;".to_string(),
            "arr[1].a = 2;".to_string(),
        ]
    );
}

#[test]
fn leaf_count_mismatch_is_an_error() {
    let mut fx = Fixture::new();
    let module = fx.module("Foo");
    let ty = fx.array(TypeId::FLOAT, 3);
    let elements = floats(&mut fx, &[1.0, 2.0]);

    let err = run(&fx, module, |ctx| lower_direct(ctx, ty, elements, "v")).unwrap_err();
    assert_eq!(
        err,
        CodegenError::AggregateLeafMismatch {
            target: "v".to_string(),
            expected: 3,
            found: 2,
        }
    );
}

#[test]
fn legacy_temporaries_are_unimplemented() {
    let mut fx = Fixture::new();
    let module = fx.module("Foo");
    let s = fx.struct_def(module, "S", &[("a", TypeId::INT)]);
    let ids = vec![fx.int(1)];
    let elements = fx.program.arena.alloc_expr_list(ids);

    let result = run(&fx, module, |ctx| lower_value_expression(ctx, s, elements));
    assert!(matches!(result, Err(CodegenError::Unimplemented(_))));
}
