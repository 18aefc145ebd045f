//! Output assembly.
//!
//! `CppGenerator` owns the two output streams and the tables that outlive a
//! single module. The body stream starts with the runtime preamble; each
//! generated module appends its namespace. Entry routine signatures go to
//! the header stream.

use ctl_ir::{CheckedProgram, ModuleId};

use crate::config::CodegenConfig;
use crate::context::{CodegenContext, EmissionTables, EntryRoutine};
use crate::error::Result;
use crate::module;
use crate::output::CodeWriter;
use crate::runtime::preamble;

/// Text produced by a completed generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedCode {
    /// Public declarations for external callers.
    pub header: String,
    /// Preamble followed by every module's definitions.
    pub body: String,
    pub entry_routines: Vec<EntryRoutine>,
}

/// C++ generator for a sequence of checked modules.
pub struct CppGenerator {
    config: CodegenConfig,
    tables: EmissionTables,
    header: CodeWriter,
    body: CodeWriter,
}

impl CppGenerator {
    /// Create a generator; the runtime preamble is written immediately.
    pub fn new(config: CodegenConfig) -> Self {
        let mut body = CodeWriter::with_capacity(16 * 1024);
        body.raw(&preamble(&config));
        Self {
            config,
            tables: EmissionTables::default(),
            header: CodeWriter::new(),
            body,
        }
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generate one module.
    ///
    /// Modules must be generated in dependency order. On error nothing the
    /// module wrote is kept: both streams and all tables are restored.
    #[tracing::instrument(level = "debug", skip_all, fields(module = program.module_name(module)))]
    pub fn generate_module(&mut self, program: &CheckedProgram, module: ModuleId) -> Result<()> {
        let body_mark = self.body.len();
        let header_mark = self.header.len();
        let snapshot = self.tables.clone();

        let result = {
            let mut ctx = CodegenContext::new(
                program,
                &self.config,
                &mut self.tables,
                &mut self.body,
                &mut self.header,
                module,
            );
            module::emit_module(&mut ctx, program.module(module))
        };

        if let Err(err) = &result {
            tracing::debug!(error = %err, "module abandoned");
            self.body.rollback(body_mark);
            self.header.rollback(header_mark);
            self.tables = snapshot;
        }
        result
    }

    /// Generate every module of a program in order, stopping at the first
    /// failure.
    pub fn generate(&mut self, program: &CheckedProgram) -> Result<()> {
        for module in program.module_ids() {
            self.generate_module(program, module)?;
        }
        Ok(())
    }

    pub fn header_code(&self) -> &str {
        self.header.as_str()
    }

    pub fn body_code(&self) -> &str {
        self.body.as_str()
    }

    /// Entry routines registered so far, in emission order.
    pub fn entry_routines(&self) -> &[EntryRoutine] {
        &self.tables.entry_routines
    }

    pub fn finish(self) -> GeneratedCode {
        GeneratedCode {
            header: self.header.into_string(),
            body: self.body.into_string(),
            entry_routines: self.tables.entry_routines,
        }
    }
}

/// Generate a whole program in one call.
pub fn generate(program: &CheckedProgram, config: CodegenConfig) -> Result<GeneratedCode> {
    let mut generator = CppGenerator::new(config);
    generator.generate(program)?;
    Ok(generator.finish())
}
