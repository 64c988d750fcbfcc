//! Rule executor
//!
//! Runs compiled programs against exporter or interface metadata. Execution
//! is synchronous and performs no I/O; the only shared state touched is the
//! regex cache.

use crate::engine::Evaluator;
use crate::environment::{Environment, ExporterEnvironment, InterfaceEnvironment};
use crate::error::{Result, RuntimeError};
use crate::regex_cache::RegexCache;
use flowclass_core::{CompiledProgram, ExporterInfo, InterfaceClassification, InterfaceInfo};
use std::sync::Arc;

/// Result of running an exporter rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExporterOutcome {
    /// Top-level result of the rule
    pub fired: bool,
    /// Group recorded by `classify`, if it was called
    pub group: Option<String>,
}

/// Executes compiled programs
#[derive(Debug, Clone, Default)]
pub struct Executor {
    regexes: Arc<RegexCache>,
}

impl Executor {
    /// Create an executor with its own, empty regex cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an executor sharing `regexes` with other executors
    pub fn with_regex_cache(regexes: Arc<RegexCache>) -> Self {
        Self { regexes }
    }

    pub fn regex_cache(&self) -> &Arc<RegexCache> {
        &self.regexes
    }

    /// Run an exporter program
    pub fn execute_exporter(
        &self,
        program: &CompiledProgram,
        exporter: &ExporterInfo,
    ) -> Result<ExporterOutcome> {
        let mut env = ExporterEnvironment::new(exporter);
        let fired = self.run(program, &mut env)?;
        Ok(ExporterOutcome {
            fired,
            group: env.into_group(),
        })
    }

    /// Run an interface program, writing into `classification`.
    ///
    /// Returns whether the rule fired. On error, whatever the rule had
    /// assigned before failing stays in `classification`.
    pub fn execute_interface(
        &self,
        program: &CompiledProgram,
        exporter: &ExporterInfo,
        interface: &InterfaceInfo,
        classification: &mut InterfaceClassification,
    ) -> Result<bool> {
        let mut env = InterfaceEnvironment::new(exporter, interface, classification);
        self.run(program, &mut env)
    }

    /// Run `program` in any environment of the matching schema
    pub fn run<E: Environment + ?Sized>(
        &self,
        program: &CompiledProgram,
        env: &mut E,
    ) -> Result<bool> {
        self.evaluate(program, env)
            .map_err(|error| RuntimeError::Rule {
                rule: program.source().to_string(),
                error: Box::new(error),
            })
    }

    fn evaluate<E: Environment + ?Sized>(
        &self,
        program: &CompiledProgram,
        env: &mut E,
    ) -> Result<bool> {
        if program.schema() != env.schema() {
            return Err(RuntimeError::SchemaMismatch {
                program: program.schema(),
                environment: env.schema(),
            });
        }

        let fired = Evaluator::new(env, &self.regexes).evaluate_bool(program.expression())?;
        tracing::trace!(rule = program.source(), fired, "Executed classifier rule");
        Ok(fired)
    }
}
