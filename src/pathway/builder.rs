use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use num_traits::{Float, Zero};
use serde::Serialize;

use crate::algorithm::oracle::NetworkOracle;
use crate::algorithm::PathOracle;
use crate::data_structures::OrderedSet;
use crate::graph::InteractionNetwork;
use crate::pathway::assembler::{Pathway, PathwayAssembler};
use crate::pathway::distance_cache::{DistanceCache, PairKey};
use crate::pathway::partition::Partition;
use crate::pathway::selector::{PathSelector, Phase, Selection};
use crate::{Error, Result};

/// Optional guards on how long a reconstruction may run
#[derive(Debug, Clone, Copy, Default)]
pub struct BuilderConfig {
    /// Stop after this many absorbed paths
    pub max_iterations: Option<usize>,
    /// Stop once this much wall-clock time has elapsed
    pub deadline: Option<Duration>,
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Why a reconstruction stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// Every source and target was connected
    Exhausted,
    /// The remaining not-visited nodes can no longer be reached
    Infeasible,
    /// `max_iterations` was reached first
    IterationLimit,
    /// `deadline` elapsed first
    DeadlineExceeded,
}

/// One absorbed path
#[derive(Debug, Clone, PartialEq)]
pub struct Step<W> {
    pub phase: Phase,
    /// Endpoint in the source role (start of `path`)
    pub from: usize,
    /// Endpoint in the target role (end of `path`)
    pub to: usize,
    pub cost: W,
    pub path: Vec<usize>,
}

/// Outcome of a reconstruction
#[derive(Debug, Clone)]
pub struct Reconstruction<W> {
    pub pathway: Pathway,
    pub halt: HaltReason,
    pub steps: Vec<Step<W>>,
    /// Sources and targets that were never connected, in their original order
    pub unreached: Vec<usize>,
}

impl<W> Reconstruction<W> {
    pub fn iterations(&self) -> usize {
        self.steps.len()
    }
}

/// Mutable state of one run, owned exclusively by the builder loop
struct RunState<W>
where
    W: Float + Zero + Debug + Copy,
{
    cache: DistanceCache<W>,
    partition: Partition,
    assembler: PathwayAssembler,
    steps: Vec<Step<W>>,
}

/// Greedy BowTieBuilder pathway reconstruction.
///
/// Each iteration first checks that progress is still possible, then picks the
/// cheapest admissible pair from a read-only view of the state, and finally applies
/// the tombstone, absorption, cache extension and assembly as a single batch.
#[derive(Debug)]
pub struct BowTieBuilder<'o, W, O>
where
    W: Float + Zero + Debug + Copy,
    O: PathOracle<W>,
{
    oracle: &'o O,
    sources: Vec<usize>,
    targets: Vec<usize>,
    config: BuilderConfig,
    _weight: PhantomData<W>,
}

impl<'o, W, O> BowTieBuilder<'o, W, O>
where
    W: Float + Zero + Debug + Copy,
    O: PathOracle<W>,
{
    /// Duplicate sources or targets are dropped, keeping the first occurrence
    pub fn new(oracle: &'o O, sources: &[usize], targets: &[usize]) -> Result<Self> {
        let vertex_count = oracle.vertex_count();
        if let Some(&v) = sources.iter().chain(targets).find(|&&v| v >= vertex_count) {
            return Err(Error::InvalidVertex(v));
        }
        Ok(BowTieBuilder {
            oracle,
            sources: sources.iter().copied().collect::<OrderedSet<_>>().to_vec(),
            targets: targets.iter().copied().collect::<OrderedSet<_>>().to_vec(),
            config: BuilderConfig::default(),
            _weight: PhantomData,
        })
    }

    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    fn is_endpoint(&self, v: usize) -> bool {
        self.sources.contains(&v) || self.targets.contains(&v)
    }

    pub fn run(&self) -> Result<Reconstruction<W>> {
        let started = Instant::now();
        let sources = self.sources.as_slice();
        let targets = self.targets.as_slice();

        let mut state = RunState {
            cache: DistanceCache::new(),
            partition: Partition::new(self.oracle.vertex_count(), sources, targets),
            assembler: PathwayAssembler::new(sources.iter().chain(targets).copied()),
            steps: Vec::new(),
        };

        let deadline = self.config.deadline.map(|limit| started + limit);
        let halt = match DistanceCache::initialize_until(self.oracle, sources, targets, deadline)? {
            Some(cache) => {
                state.cache = cache;
                self.iterate(&mut state, started)?
            }
            None => {
                warn!(
                    "Stopping while computing source-target distances, {:?} elapsed",
                    started.elapsed()
                );
                HaltReason::DeadlineExceeded
            }
        };

        let unreached = state.partition.not_visited().to_vec();
        let reconstruction = Reconstruction {
            pathway: state.assembler.finalize(),
            halt,
            steps: state.steps,
            unreached,
        };
        info!(
            "Pathway reconstruction halted ({:?}) after {} iterations: {} nodes, {} edges",
            halt,
            reconstruction.iterations(),
            reconstruction.pathway.node_count(),
            reconstruction.pathway.edge_count()
        );
        Ok(reconstruction)
    }

    /// Absorbs paths until one of the halt conditions holds
    fn iterate(&self, state: &mut RunState<W>, started: Instant) -> Result<HaltReason> {
        let selector = PathSelector::new(&self.sources, &self.targets);
        loop {
            let not_visited = state.partition.not_visited().len();
            if not_visited == 0 {
                return Ok(HaltReason::Exhausted);
            }
            if let Some(limit) = self.config.max_iterations {
                if state.steps.len() >= limit {
                    warn!("Stopping after {} iterations with {} nodes unconnected", limit, not_visited);
                    return Ok(HaltReason::IterationLimit);
                }
            }
            if let Some(deadline) = self.config.deadline {
                if started.elapsed() >= deadline {
                    warn!("Stopping after {:?} with {} nodes unconnected", deadline, not_visited);
                    return Ok(HaltReason::DeadlineExceeded);
                }
            }
            if !state.partition.feasible(self.oracle) {
                info!("No remaining node can reach the {} unconnected nodes", not_visited);
                return Ok(HaltReason::Infeasible);
            }

            // Feasibility only looks at unabsorbed nodes, so a waiting node can be
            // reachable from the graph and still have no finite route to the pathway
            let Some(selection) = selector.select(&state.cache, &state.partition) else {
                warn!("No finite path connects the {} unconnected nodes to the pathway", not_visited);
                return Ok(HaltReason::Infeasible);
            };
            self.apply(state, selection)?;
        }
    }

    /// Applies one selection to every piece of run state
    fn apply(&self, state: &mut RunState<W>, selection: Selection<W>) -> Result<()> {
        let Selection { phase, key, route } = selection;
        let (from, to): PairKey = key;
        debug!(
            "Iteration {} ({:?}): absorbing {} -> {} at cost {:?} via {:?}",
            state.steps.len(),
            phase,
            from,
            to,
            route.distance,
            route.path
        );

        state.cache.tombstone(key);
        state.partition.absorb(&route.path);
        for &v in &route.path {
            if !self.is_endpoint(v) {
                state
                    .cache
                    .extend(self.oracle, v, &self.sources, &self.targets)?;
            }
        }
        state.assembler.add_path(&route.path);
        state.steps.push(Step {
            phase,
            from,
            to,
            cost: route.distance,
            path: route.path,
        });
        Ok(())
    }
}

/// Runs a reconstruction over a named network with Dijkstra shortest paths.
///
/// Every source and target must already be a node of `network`.
pub fn reconstruct<W, S>(
    network: &InteractionNetwork<W>,
    sources: &[S],
    targets: &[S],
    config: BuilderConfig,
) -> Result<Reconstruction<W>>
where
    W: Float + Zero + Debug + Copy + Ord,
    S: AsRef<str>,
{
    let resolve = |names: &[S]| -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| network.require_vertex(name.as_ref()))
            .collect()
    };
    let sources = resolve(sources)?;
    let targets = resolve(targets)?;

    let oracle: NetworkOracle<'_, W, _> = NetworkOracle::new(network.graph());
    BowTieBuilder::new(&oracle, &sources, &targets)?
        .with_config(config)
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    type W = OrderedFloat<f64>;

    fn network(edges: &[(&str, &str, f64)], extra: &[&str]) -> InteractionNetwork<W> {
        InteractionNetwork::build(
            edges.iter().map(|&(a, b, w)| (a, b, OrderedFloat(w))),
            extra.iter().copied(),
        )
        .unwrap()
    }

    fn names(network: &InteractionNetwork<W>, vertices: &[usize]) -> Vec<String> {
        network.labels_of(vertices).unwrap()
    }

    #[test]
    fn test_bow_tie_example_halts_when_nothing_unabsorbed_remains() {
        let net = network(
            &[("A", "B", 1.0), ("B", "D", 1.0), ("C", "B", 2.0), ("B", "E", 1.0)],
            &["A", "C", "D", "E"],
        );
        let result = reconstruct(&net, &["A", "C"], &["D", "E"], BuilderConfig::new()).unwrap();

        assert_eq!(result.steps.len(), 1);
        let first = &result.steps[0];
        assert_eq!(first.phase, Phase::Bootstrap);
        assert_eq!(names(&net, &first.path), ["A", "B", "D"]);
        assert_eq!(first.cost, OrderedFloat(2.0));

        // C and E are still waiting but every other node is absorbed
        assert_eq!(result.halt, HaltReason::Infeasible);
        assert_eq!(names(&net, &result.unreached), ["C", "E"]);
        assert_eq!(
            result.pathway.labelled_edges(&net).unwrap(),
            vec![("A".to_string(), "B".to_string()), ("B".to_string(), "D".to_string())]
        );
        assert_eq!(names(&net, result.pathway.nodes()), ["A", "C", "D", "E", "B"]);
    }

    #[test]
    fn test_growth_phase_connects_through_intermediate() {
        let net = network(
            &[("A", "B", 1.0), ("B", "D", 1.0), ("B", "X", 1.0), ("X", "E", 1.0)],
            &[],
        );
        let result = reconstruct(&net, &["A"], &["D", "E"], BuilderConfig::new()).unwrap();

        assert_eq!(result.halt, HaltReason::Exhausted);
        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.steps[1].phase, Phase::Growth);
        assert_eq!(names(&net, &result.steps[1].path), ["B", "X", "E"]);
        assert_eq!(result.steps[1].cost, OrderedFloat(2.0));
        assert!(result.unreached.is_empty());

        let edges = result.pathway.labelled_edges(&net).unwrap();
        let edges: Vec<(&str, &str)> = edges.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        assert_eq!(edges, [("A", "B"), ("B", "D"), ("B", "X"), ("X", "E")]);
    }

    #[test]
    fn test_source_without_route_stays_isolated() {
        let net = network(&[("A", "B", 1.0), ("B", "D", 1.0)], &["S"]);
        let result = reconstruct(&net, &["A", "S"], &["D"], BuilderConfig::new()).unwrap();

        assert_eq!(result.halt, HaltReason::Infeasible);
        let s = net.vertex_id("S").unwrap();
        assert_eq!(result.pathway.isolated_nodes(), vec![s]);
        assert_eq!(result.unreached, vec![s]);
    }

    #[test]
    fn test_self_pair_is_never_selected() {
        // N is both a source and a target; Y keeps the build feasible
        let net = network(
            &[
                ("A", "I", 1.0),
                ("I", "D", 1.0),
                ("I", "N", 5.0),
                ("N", "I", 5.0),
                ("Y", "N", 100.0),
            ],
            &[],
        );
        let result = reconstruct(&net, &["A", "N"], &["D", "N"], BuilderConfig::new()).unwrap();

        assert_eq!(result.halt, HaltReason::Exhausted);
        assert!(result.steps.iter().all(|step| step.from != step.to));
        assert_eq!(names(&net, &result.steps[1].path), ["I", "N"]);
    }

    #[test]
    fn test_iteration_limit_returns_partial_pathway() {
        let net = network(
            &[("A", "B", 1.0), ("B", "D", 1.0), ("B", "X", 1.0), ("X", "E", 1.0)],
            &[],
        );
        let config = BuilderConfig::new().with_max_iterations(1);
        let result = reconstruct(&net, &["A"], &["D", "E"], config).unwrap();

        assert_eq!(result.halt, HaltReason::IterationLimit);
        assert_eq!(result.iterations(), 1);
        assert_eq!(names(&net, &result.unreached), ["E"]);
    }

    #[test]
    fn test_zero_deadline_stops_before_first_iteration() {
        let net = network(&[("A", "B", 1.0)], &[]);
        let config = BuilderConfig::new().with_deadline(Duration::ZERO);
        let result = reconstruct(&net, &["A"], &["B"], config).unwrap();

        assert_eq!(result.halt, HaltReason::DeadlineExceeded);
        assert_eq!(result.pathway.edge_count(), 0);
    }

    #[test]
    fn test_unconnectable_target_reached_only_from_outside_halts_infeasible() {
        // X reaches D, but no source does
        let net = network(&[("X", "D", 1.0)], &["A"]);
        let result = reconstruct(&net, &["A"], &["D"], BuilderConfig::new()).unwrap();

        assert_eq!(result.halt, HaltReason::Infeasible);
        assert_eq!(result.iterations(), 0);
        assert_eq!(names(&net, &result.unreached), ["A", "D"]);
        assert_eq!(result.pathway.edge_count(), 0);
    }

    #[test]
    fn test_stranded_source_with_unabsorbed_predecessor_stays_isolated() {
        // Y still reaches S after A -> B -> D is absorbed, yet nothing in the
        // pathway connects to S
        let net = network(&[("A", "B", 1.0), ("B", "D", 1.0), ("Y", "S", 1.0)], &[]);
        let result = reconstruct(&net, &["A", "S"], &["D"], BuilderConfig::new()).unwrap();

        assert_eq!(result.halt, HaltReason::Infeasible);
        assert_eq!(result.iterations(), 1);
        assert_eq!(names(&net, &result.steps[0].path), ["A", "B", "D"]);
        let s = net.vertex_id("S").unwrap();
        assert_eq!(result.unreached, vec![s]);
        assert_eq!(result.pathway.isolated_nodes(), vec![s]);
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let net = network(&[("A", "B", 1.0)], &[]);
        let result = reconstruct(&net, &["Q"], &["B"], BuilderConfig::new());

        assert!(matches!(result, Err(Error::UnknownNode(name)) if name == "Q"));
    }
}
