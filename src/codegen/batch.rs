use super::{Compilation, CompileOptions, Compiler};
use crate::backend::Backend;
use crate::error::CompileError;
use crate::store::GuesstimateData;
use rayon::prelude::*;

/// Compiles independent models in parallel. Results are in input order and
/// one model's failure does not affect the others.
pub fn compile_batch<B>(
    models: &[GuesstimateData],
    backend: &B,
    options: &CompileOptions,
) -> Vec<Result<Compilation, CompileError>>
where
    B: Backend + Sync + ?Sized,
{
    let compiler = Compiler::new(backend, options);
    models.par_iter().map(|data| compiler.compile(data)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Squiggle, Target};
    use crate::store::{Graph, GuessKind, Guesstimate, Metric};

    fn single_point(url: &str, metric: &str) -> GuesstimateData {
        GuesstimateData {
            url: url.into(),
            graph: Graph {
                metrics: vec![Metric { id: "m".into(), name: "Value".into() }],
                guesstimates: vec![Guesstimate {
                    metric: metric.into(),
                    kind: GuessKind::Point,
                    expression: Some("1".into()),
                    description: None,
                    data: None,
                }],
            },
        }
    }

    #[test]
    fn test_batch_preserves_order_and_isolates_failures() {
        let models: Vec<_> = (0..16)
            .map(|i| single_point(&format!("u{}", i), if i == 5 { "missing" } else { "m" }))
            .collect();

        let results = compile_batch(&models, &Squiggle, &CompileOptions::default());

        assert_eq!(results.len(), 16);
        for (i, res) in results.iter().enumerate() {
            if i == 5 {
                assert_eq!(res, &Err(CompileError::MissingMetric { metric: "missing".into() }));
            } else {
                // Names never leak between models: each one gets a plain `value`.
                let code = &res.as_ref().unwrap().code;
                assert_eq!(code, &format!("// Generated from u{}\nvalue = 1 // Value", i));
            }
        }
    }

    #[test]
    fn test_batch_accepts_boxed_target_backend() {
        let backend = Target::Python.backend();
        let results = compile_batch(&[single_point("u", "m")], backend.as_ref(), &CompileOptions::default());
        assert!(results[0].as_ref().unwrap().code.ends_with("\n# Value\nvalue = 1"));
    }
}
