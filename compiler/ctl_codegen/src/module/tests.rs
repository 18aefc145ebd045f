use ctl_ir::{BinaryOp, ParamAccess, StmtKind, TypeId};
use pretty_assertions::assert_eq;

use crate::config::{CodegenConfig, Precision};
use crate::error::CodegenError;
use crate::generator::CppGenerator;
use crate::test_helpers::Fixture;

#[test]
fn literal_constants_fold_and_vanish() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let three = fx.int(3);
    let four = fx.int(4);
    let sum = fx.binary(BinaryOp::Add, three, four);
    let k = fx.constant(foo, "k", TypeId::INT, Some(sum));
    let k_ref = fx.name_ref(k);
    let two = fx.int(2);
    let product = fx.binary(BinaryOp::Mul, k_ref, two);
    let m = fx.constant(foo, "m", TypeId::INT, Some(product));
    let m_ref = fx.name_ref(m);
    let ret = fx.ret(m_ref);
    fx.function(foo, "g", Vec::new(), TypeId::INT, &[ret]);

    let code = fx.module_code(CodegenConfig::default());
    assert_eq!(
        code,
        "\n// Module Foo (Foo.ctl)\n\nnamespace Foo {\n\n\n\
         static inline int\ng()\n{\n    return 14;\n}\n\n} // namespace Foo\n"
    );
}

#[test]
fn legacy_call_initializers_are_deferred_in_order() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let one = fx.float(1.0);
    let ret = fx.ret(one);
    let f = fx.function(foo, "f", Vec::new(), TypeId::FLOAT, &[ret]);
    let call = fx.call(f, &[]);
    let a = fx.constant(foo, "a", TypeId::FLOAT, Some(call));
    let a_ref = fx.name_ref(a);
    let one = fx.float(1.0);
    let sum = fx.binary(BinaryOp::Add, a_ref, one);
    fx.constant(foo, "b", TypeId::FLOAT, Some(sum));

    let code = fx.module_code(CodegenConfig::legacy());
    let expected = "
// Module Foo (Foo.ctl)

namespace Foo {

static float f();

float a;
float b;

struct __ctlcc_InitVals_Foo
{
    __ctlcc_InitVals_Foo( void )
    {
        a = f();
        b = (a + 1.0);
    }
};
static __ctlcc_InitVals_Foo __ctlcc_GlobalInitializer_Foo;

static float
f()
{
    return 1.0;
}

} // namespace Foo
";
    assert_eq!(code, expected);
}

#[test]
fn legacy_deferral_chains_through_globals() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let one = fx.float(1.0);
    let ret = fx.ret(one);
    let f = fx.function(foo, "f", Vec::new(), TypeId::FLOAT, &[ret]);
    let call = fx.call(f, &[]);
    let a = fx.constant(foo, "a", TypeId::FLOAT, Some(call));
    let a_ref = fx.name_ref(a);
    let one = fx.float(1.0);
    let sum = fx.binary(BinaryOp::Add, a_ref, one);
    let b = fx.constant(foo, "b", TypeId::FLOAT, Some(sum));
    let b_ref = fx.name_ref(b);
    let two = fx.float(2.0);
    let product = fx.binary(BinaryOp::Mul, b_ref, two);
    fx.constant(foo, "c", TypeId::FLOAT, Some(product));

    let code = fx.module_code(CodegenConfig::legacy());
    assert!(code.contains("float a;\nfloat b;\nfloat c;\n"));
    assert!(code.contains(
        "    {\n        a = f();\n        b = (a + 1.0);\n        c = (b * 2.0);\n    }\n"
    ));
    assert!(!code.contains("const float"));
}

#[test]
fn initializer_scan_declares_every_callee() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let one = fx.float(1.0);
    let ret = fx.ret(one);
    let f = fx.function(foo, "f", Vec::new(), TypeId::FLOAT, &[ret]);
    let two = fx.float(2.0);
    let ret = fx.ret(two);
    let g = fx.function(foo, "g", Vec::new(), TypeId::FLOAT, &[ret]);
    let f_call = fx.call(f, &[]);
    let g_call = fx.call(g, &[]);
    let sum = fx.binary(BinaryOp::Add, f_call, g_call);
    fx.constant(foo, "a", TypeId::FLOAT, Some(sum));

    for config in [CodegenConfig::default(), CodegenConfig::legacy()] {
        let code = fx.module_code(config);
        assert!(code.contains("static float f();\nstatic float g();\n"));
        assert!(code.contains("static float\nf()\n"));
        assert!(code.contains("static float\ng()\n"));
        assert!(!code.contains("static inline"));
    }
}

#[test]
fn legacy_placeholder_default_may_call_module_function() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let one = fx.float(1.0);
    let ret = fx.ret(one);
    let f = fx.function(foo, "f", Vec::new(), TypeId::FLOAT, &[ret]);
    let call = fx.call(f, &[]);
    let placeholder = fx.constant(foo, "g$y", TypeId::FLOAT, Some(call));

    let y = fx.variable(None, "y", TypeId::FLOAT, false);
    let y_ref = fx.name_ref(y);
    let ret = fx.ret(y_ref);
    let default = fx.name_ref(placeholder);
    let params = vec![fx.param("y", TypeId::FLOAT, ParamAccess::Read).with_default(default)];
    let g = fx.function(foo, "g", params, TypeId::FLOAT, &[ret]);
    let call = fx.call(g, &[]);
    let ret = fx.ret(call);
    fx.function(foo, "h", Vec::new(), TypeId::FLOAT, &[ret]);

    let code = fx.module_code(CodegenConfig::legacy());
    assert!(code.contains("static float f();\n"));
    assert!(code.contains("return g( Foo::f() );"));
    assert!(!code.contains("g$y"));
    assert!(!code.contains("__ctlcc_InitVals_Foo"));
}

#[test]
fn double_precision_keeps_float_arithmetic_verbatim() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let one = fx.float(1.0);
    let three = fx.float(3.0);
    let third = fx.binary(BinaryOp::Div, one, three);
    let c = fx.constant(foo, "c", TypeId::FLOAT, Some(third));
    let c_ref = fx.name_ref(c);
    let ret = fx.ret(c_ref);
    fx.function(foo, "g", Vec::new(), TypeId::FLOAT, &[ret]);
    let big = fx.int(16_777_217);
    let wide = fx.constant(foo, "wide", TypeId::FLOAT, Some(big));
    let wide_ref = fx.name_ref(wide);
    let ret = fx.ret(wide_ref);
    fx.function(foo, "w", Vec::new(), TypeId::FLOAT, &[ret]);
    let three = fx.int(3);
    let four = fx.int(4);
    let sum = fx.binary(BinaryOp::Add, three, four);
    let k = fx.constant(foo, "k", TypeId::INT, Some(sum));
    let k_ref = fx.name_ref(k);
    let ret = fx.ret(k_ref);
    fx.function(foo, "n", Vec::new(), TypeId::INT, &[ret]);

    let single = fx.module_code(CodegenConfig::default());
    assert!(single.contains("g()\n{\n    return 0.33333334;\n}"));

    let double = fx.module_code(CodegenConfig::default().with_precision(Precision::Double));
    assert!(double.contains("g()\n{\n    return (1.0 / 3.0);\n}"));
    assert!(!double.contains("16777216"));
    assert!(double.contains("n()\n{\n    return 7;\n}"));
}

#[test]
fn modern_call_initializers_stay_inline() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let one = fx.float(1.0);
    let ret = fx.ret(one);
    let f = fx.function(foo, "f", Vec::new(), TypeId::FLOAT, &[ret]);
    let call = fx.call(f, &[]);
    fx.constant(foo, "a", TypeId::FLOAT, Some(call));

    let code = fx.module_code(CodegenConfig::default());
    assert!(code.contains("static float f();\n"));
    assert!(code.contains("const float a = f();\n"));
    assert!(!code.contains("__ctlcc_InitVals_Foo"));
}

#[test]
fn struct_definitions_come_first() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let v3 = fx.array(TypeId::FLOAT, 3);
    fx.struct_def(foo, "S", &[("v", v3), ("n", TypeId::INT)]);

    let code = fx.module_code(CodegenConfig::default());
    assert!(code.contains("namespace Foo {\n\nstruct S\n{\n    Imath::V3f v;\n    int n;\n};\n\n"));
}

#[test]
fn legacy_struct_constant_is_assigned_member_by_member() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let v3 = fx.array(TypeId::FLOAT, 3);
    let s = fx.struct_def(foo, "S", &[("v", v3), ("n", TypeId::INT)]);
    let leaves = [fx.float(1.0), fx.float(2.0), fx.float(3.0), fx.int(4)];
    let init = fx.value(s, &leaves);
    fx.constant(foo, "s", s, Some(init));

    let code = fx.module_code(CodegenConfig::legacy());
    assert!(code.contains("\nS s;\n"));
    assert!(code.contains(
        "    {\n        s.v = Imath::V3f( 1.0, 2.0, 3.0 );\n        s.n = 4;\n    }\n"
    ));
}

#[test]
fn containers_by_dialect() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let s = fx.struct_def(foo, "S", &[("a", TypeId::INT)]);
    let ty = fx.array(s, 2);
    let leaves = [fx.int(1), fx.int(2)];
    let init = fx.value(ty, &leaves);
    fx.constant(foo, "arr", ty, Some(init));

    let modern = fx.module_code(CodegenConfig::default());
    assert!(modern.contains("const std::vector< S > arr = { { 1 }, { 2 } };\n"));

    let legacy = fx.module_code(CodegenConfig::legacy());
    assert!(legacy.contains("\nstd::vector< S > arr;\n"));
    assert!(legacy.contains(
        "        arr.resize( 2 );\n        arr[0].a = 1;\n        arr[1].a = 2;\n"
    ));
}

#[test]
fn matrix_constant_uses_constructor() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let row = fx.array(TypeId::FLOAT, 3);
    let ty = fx.array(row, 3);
    let leaves: Vec<_> = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        .iter()
        .map(|&v| fx.float(v))
        .collect();
    let init = fx.value(ty, &leaves);
    fx.constant(foo, "identity", ty, Some(init));

    let code = fx.module_code(CodegenConfig::default());
    assert!(code.contains(
        "const Imath::M33f identity( 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0 );\n"
    ));
}

#[test]
fn entry_routine_goes_to_header_and_main_is_renamed() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let params = vec![
        fx.param("x", TypeId::FLOAT, ParamAccess::Read),
        fx.param("y", TypeId::FLOAT, ParamAccess::Write),
    ];
    let main = fx.function(foo, "main", params, TypeId::VOID, &[]);

    let code = fx.generate(CodegenConfig::default()).unwrap();
    assert_eq!(
        code.header,
        "namespace Foo {\nvoid Foo( const float x, float &y );\n} // namespace Foo\n"
    );
    assert!(code
        .body
        .contains("namespace Foo {\n\nvoid\nFoo( const float x, float &y )\n{\n}\n\n"));
    assert_eq!(code.entry_routines.len(), 1);
    assert_eq!(code.entry_routines[0].name, "Foo");
    assert_eq!(code.entry_routines[0].qualified_name, "Foo::Foo");
    assert_eq!(code.entry_routines[0].symbol, main);
}

#[test]
fn globals_are_qualified_from_other_modules() {
    let mut fx = Fixture::new();
    let bar = fx.module("Bar");
    let foo = fx.module("Foo");
    let two = fx.float(2.0);
    let ret = fx.ret(two);
    let f = fx.function(bar, "f", Vec::new(), TypeId::FLOAT, &[ret]);
    let call = fx.call(f, &[]);
    let scale = fx.constant(bar, "scale", TypeId::FLOAT, Some(call));

    let local = fx.name_ref(scale);
    let ret = fx.ret(local);
    fx.function(bar, "local", Vec::new(), TypeId::FLOAT, &[ret]);
    let remote = fx.name_ref(scale);
    let ret = fx.ret(remote);
    fx.function(foo, "remote", Vec::new(), TypeId::FLOAT, &[ret]);

    let code = fx.module_code(CodegenConfig::default());
    assert!(code.contains("const float scale = f();\n"));
    assert!(code.contains("local()\n{\n    return scale;\n}"));
    assert!(code.contains("remote()\n{\n    return Bar::scale;\n}"));
}

#[test]
fn placeholder_defaults_are_substituted_not_declared() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let v3 = fx.array(TypeId::FLOAT, 3);
    let leaves = [fx.float(1.0), fx.float(2.0), fx.float(3.0)];
    let value = fx.value(v3, &leaves);
    let placeholder = fx.constant(foo, "g$y", v3, Some(value));

    let x = fx.variable(None, "x", TypeId::INT, false);
    let x_ref = fx.name_ref(x);
    let ret = fx.ret(x_ref);
    let default = fx.name_ref(placeholder);
    let params = vec![
        fx.param("x", TypeId::INT, ParamAccess::Read),
        fx.param("y", v3, ParamAccess::Read).with_default(default),
    ];
    let g = fx.function(foo, "g", params, TypeId::INT, &[ret]);
    let one = fx.int(1);
    let call = fx.call(g, &[one]);
    let ret = fx.ret(call);
    fx.function(foo, "h", Vec::new(), TypeId::INT, &[ret]);

    let code = fx.module_code(CodegenConfig::default());
    assert!(!code.contains("g$y"));
    assert!(code.contains("g( const int x, const Imath::V3f &y )\n"));
    assert!(code.contains("return g( 1, Imath::V3f( 1.0, 2.0, 3.0 ) );"));
}

#[test]
fn legacy_aggregate_placeholder_needs_a_name() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let s = fx.struct_def(foo, "S", &[("a", TypeId::INT)]);
    let leaves = [fx.int(1)];
    let value = fx.value(s, &leaves);
    fx.constant(foo, "f$s", s, Some(value));

    assert_eq!(
        fx.generate(CodegenConfig::legacy()).unwrap_err(),
        CodegenError::UnsupportedPlaceholderInit {
            name: "f$s".to_string(),
        }
    );
}

#[test]
fn aggregate_leaf_mismatch_aborts() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let v3 = fx.array(TypeId::FLOAT, 3);
    let leaves = [fx.float(1.0), fx.float(2.0)];
    let value = fx.value(v3, &leaves);
    fx.constant(foo, "v", v3, Some(value));

    assert_eq!(
        fx.generate(CodegenConfig::default()).unwrap_err(),
        CodegenError::AggregateLeafMismatch {
            target: "v".to_string(),
            expected: 3,
            found: 2,
        }
    );
}

#[test]
fn void_constant_has_no_strategy() {
    let mut fx = Fixture::new();
    let foo = fx.module("Foo");
    let print = fx.function_symbol(None, "print_float", Vec::new(), TypeId::VOID);
    let call = fx.call(print, &[]);
    fx.constant(foo, "nothing", TypeId::VOID, Some(call));

    assert_eq!(
        fx.generate(CodegenConfig::default()).unwrap_err(),
        CodegenError::UnresolvedInitStrategy {
            name: "nothing".to_string(),
        }
    );
}

#[test]
fn failed_module_is_rolled_back() {
    let mut fx = Fixture::new();
    let good = fx.module("Good");
    let ret = fx.stmt(StmtKind::Return(None));
    fx.function(good, "Good", Vec::new(), TypeId::VOID, &[ret]);

    let bad = fx.module("Bad");
    let one = fx.int(1);
    let ret = fx.ret(one);
    let f = fx.function(bad, "f", Vec::new(), TypeId::INT, &[ret]);
    let extra = fx.int(2);
    let call = fx.call(f, &[extra]);
    let expr = fx.stmt(StmtKind::Expr(call));
    fx.function(bad, "Bad", Vec::new(), TypeId::VOID, &[expr]);

    let mut generator = CppGenerator::new(CodegenConfig::default());
    generator.generate_module(&fx.program, good).unwrap();
    let body = generator.body_code().to_string();
    let header = generator.header_code().to_string();

    let err = generator.generate_module(&fx.program, bad).unwrap_err();
    assert_eq!(
        err,
        CodegenError::TooManyArguments {
            function: "f".to_string(),
            supplied: 1,
            expected: 0,
        }
    );
    assert_eq!(generator.body_code(), body);
    assert_eq!(generator.header_code(), header);
    assert_eq!(generator.entry_routines().len(), 1);
    assert_eq!(generator.entry_routines()[0].qualified_name, "Good::Good");
}

#[test]
fn preamble_is_written_once() {
    let mut fx = Fixture::new();
    fx.module("A");
    fx.module("B");
    let code = fx.generate(CodegenConfig::default()).unwrap();
    assert_eq!(code.body.matches("namespace _ctlcc_ {").count(), 1);
    assert!(code.body.starts_with("// C++ code automatically generated\n"));
    assert!(code.body.ends_with("} // namespace B\n"));
}
