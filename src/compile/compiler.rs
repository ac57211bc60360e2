use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rayon::prelude::*;

use crate::{
    compile::bounds::{TheaterVolume, check_bounds},
    compile::loader::load_document,
    compile::options::{CompileOptions, build_thread_pool},
    compile::report::{CompileReport, Diagnostic},
    compile::synthesize::{order_chronologically, synthesize_vehicle},
    compile::validate::ContinuityValidator,
    document::node::DocumentNode,
    foundation::core::{Point, VehicleId},
    foundation::error::{ChorusError, ChorusResult},
    routine::action::Action,
    routine::timeline::Routine,
};

#[derive(Clone, Debug)]
/// A finished routine plus everything recoverable found while building it.
pub struct Compilation {
    /// Compiled, immutable routine.
    pub routine: Routine,
    /// Warnings and errors in discovery order.
    pub report: CompileReport,
}

impl Compilation {
    /// The routine if no [`crate::Severity::Error`] diagnostic was reported.
    pub fn into_clean(self) -> ChorusResult<Routine> {
        if self.report.has_errors() {
            let first = self
                .report
                .errors()
                .next()
                .map(ToString::to_string)
                .unwrap_or_default();
            return Err(ChorusError::rejected(format!(
                "{}; first: {first}",
                self.report.summary()
            )));
        }
        Ok(self.routine)
    }
}

/// Per-vehicle inputs that the parallel stage only reads.
struct StageCtx<'a> {
    validator: ContinuityValidator,
    volume: Option<&'a TheaterVolume>,
    bounds_samples: usize,
}

struct VehicleOutput {
    actions: Vec<Action>,
    diagnostics: Vec<Diagnostic>,
}

/// Stateless choreography compiler.
pub struct Compiler;

impl Compiler {
    /// Compile an in-memory document tree.
    #[tracing::instrument(skip(doc))]
    pub fn compile<D: DocumentNode>(
        doc: &D,
        opts: &CompileOptions,
    ) -> ChorusResult<Compilation> {
        opts.validate()?;
        let mut report = CompileReport::default();
        let loaded = load_document(doc, opts.scale, &mut report)?;

        let ctx = StageCtx {
            validator: ContinuityValidator::from_options(opts),
            volume: loaded.volume.as_ref(),
            bounds_samples: opts.bounds_samples,
        };
        let homes = &loaded.homes;
        let jobs: Vec<(VehicleId, Vec<Action>)> = loaded
            .actions
            .into_iter()
            .enumerate()
            .map(|(i, a)| (VehicleId(i), a))
            .collect();

        let outputs = if opts.parallel {
            let pool = build_thread_pool(opts.threads)?;
            pool.install(|| {
                jobs.into_par_iter()
                    .map(|(v, a)| process_vehicle(v, &homes[v.index()], a, &ctx))
                    .collect::<ChorusResult<Vec<_>>>()
            })?
        } else {
            jobs.into_iter()
                .map(|(v, a)| process_vehicle(v, &homes[v.index()], a, &ctx))
                .collect::<ChorusResult<Vec<_>>>()?
        };

        let mut actions = Vec::with_capacity(outputs.len());
        for out in outputs {
            report.extend(out.diagnostics);
            actions.push(out.actions);
        }

        tracing::debug!(
            vehicles = actions.len(),
            repeat = loaded.repeat,
            summary = %report.summary(),
            "compilation finished"
        );

        let routine = Routine::new(
            loaded.units,
            loaded.homes,
            actions,
            loaded.light_actions,
            loaded.breakpoints,
        );
        Ok(Compilation { routine, report })
    }

    /// Parse JSON text and compile it.
    pub fn compile_str(json: &str, opts: &CompileOptions) -> ChorusResult<Compilation> {
        let doc: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ChorusError::serde(format!("parse choreography JSON: {e}")))?;
        Self::compile(&doc, opts)
    }

    /// Parse JSON from a reader and compile it.
    pub fn compile_reader<R: std::io::Read>(
        r: R,
        opts: &CompileOptions,
    ) -> ChorusResult<Compilation> {
        let doc: serde_json::Value = serde_json::from_reader(r)
            .map_err(|e| ChorusError::serde(format!("parse choreography JSON: {e}")))?;
        Self::compile(&doc, opts)
    }

    /// Read a choreography file from disk and compile it.
    pub fn compile_path(
        path: impl AsRef<Path>,
        opts: &CompileOptions,
    ) -> ChorusResult<Compilation> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ChorusError::Other(anyhow::anyhow!(
                "open choreography '{}': {e}",
                path.display()
            ))
        })?;
        Self::compile_reader(BufReader::new(f), opts)
    }
}

impl Routine {
    /// Read and compile the choreography at `path`.
    pub fn load(path: impl AsRef<Path>, opts: &CompileOptions) -> ChorusResult<Compilation> {
        Compiler::compile_path(path, opts)
    }
}

/// Order, synthesize, sort, validate and bounds-check one vehicle.
fn process_vehicle(
    vehicle: VehicleId,
    home: &Point,
    mut actions: Vec<Action>,
    ctx: &StageCtx<'_>,
) -> ChorusResult<VehicleOutput> {
    let mut diagnostics = Vec::new();

    if order_chronologically(&mut actions) {
        diagnostics.push(Diagnostic::Reordered { vehicle });
    }

    let (mut actions, unresolved) = synthesize_vehicle(vehicle, home, actions)?;
    diagnostics.extend(unresolved);

    actions.sort_by(|a, b| a.start_time().total_cmp(&b.start_time()));

    diagnostics.extend(
        ctx.validator
            .validate_vehicle(vehicle, home, &actions)
            .into_iter()
            .map(Diagnostic::Continuity),
    );

    if let Some(volume) = ctx.volume {
        diagnostics.extend(check_bounds(
            vehicle,
            home,
            &actions,
            volume,
            ctx.bounds_samples,
        ));
    }

    Ok(VehicleOutput {
        actions,
        diagnostics,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
