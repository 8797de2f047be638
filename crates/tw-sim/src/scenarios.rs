//! Independent constructions evaluated side by side.
//!
//! Every scenario owns its wall and state; only the catalog (read-only) is
//! shared, so scenarios run on the rayon pool without locking.

use rayon::prelude::*;
use tw_solver::Construction;

use crate::error::SimResult;

#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub id: String,
    pub construction: Construction,
}

impl Scenario {
    pub fn new(id: impl Into<String>, construction: Construction) -> Self {
        Self {
            id: id.into(),
            construction,
        }
    }
}

#[derive(Debug)]
pub struct ScenarioOutcome<T> {
    pub id: String,
    pub result: SimResult<T>,
}

/// Evaluate every scenario with `evaluate`, in parallel.
///
/// Outcomes come back in input order. A failing scenario does not affect
/// the others.
pub fn run_scenarios<T, F>(scenarios: &[Scenario], evaluate: F) -> Vec<ScenarioOutcome<T>>
where
    T: Send,
    F: Fn(&Scenario) -> SimResult<T> + Sync,
{
    scenarios
        .par_iter()
        .map(|scenario| ScenarioOutcome {
            id: scenario.id.clone(),
            result: evaluate(scenario),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{InitialConditions, RunParameters, run};
    use crate::SimError;
    use tw_materials::{MaterialCatalog, standard_catalog};
    use tw_solver::{Layer, SolverError};

    #[test]
    fn scenarios_are_independent_and_ordered() {
        let catalog = standard_catalog();
        let shared: &dyn MaterialCatalog = &catalog;
        let params = RunParameters {
            nx: 10,
            dt: 900.0,
            ho: 20.0,
            hi: 8.0,
            la: 3.0,
            ..RunParameters::default()
        };
        let series = vec![30.0; 24];
        let scenarios = vec![
            Scenario::new(
                "concrete",
                Construction::new(vec![Layer::meters("concrete", 0.15)]).unwrap(),
            ),
            Scenario::new(
                "missing",
                Construction::new(vec![Layer::meters("unobtainium", 0.1)]).unwrap(),
            ),
            Scenario::new(
                "insulated",
                Construction::new(vec![
                    Layer::meters("concrete", 0.1),
                    Layer::meters("eps", 0.05),
                ])
                .unwrap(),
            ),
        ];

        let outcomes = run_scenarios(&scenarios, |s| {
            run(
                &s.construction,
                shared,
                &params,
                series.len(),
                &series,
                InitialConditions::uniform(20.0, 20.0),
            )
        });

        let ids: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["concrete", "missing", "insulated"]);
        assert!(outcomes[0].result.is_ok());
        assert!(matches!(
            outcomes[1].result,
            Err(SimError::Solver(SolverError::MaterialNotFound { .. }))
        ));

        // Sequential evaluation gives the same numbers.
        let sequential = run(
            &scenarios[2].construction,
            shared,
            &params,
            series.len(),
            &series,
            InitialConditions::uniform(20.0, 20.0),
        )
        .unwrap();
        assert_eq!(outcomes[2].result.as_ref().unwrap(), &sequential);
    }
}
