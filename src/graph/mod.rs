//! Dependency graph for step ordering.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::error::{CairnError, Result};

/// Represents the dependency relationships between registered steps.
///
/// Edges that name a step not present in the graph are dropped at build
/// time: an unregistered dependency constrains nothing. Missing
/// dependencies are reported separately, by
/// [`ImportStepRegistry::missing_dependencies`](crate::registry::ImportStepRegistry::missing_dependencies).
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Map of step id to its direct dependencies (registered ids only).
    dependencies: HashMap<String, HashSet<String>>,
    /// Map of step id to steps that depend on it.
    dependents: HashMap<String, HashSet<String>>,
    /// All step ids in the graph.
    steps: HashSet<String>,
}

impl DependencyGraph {
    /// Create a new dependency graph builder.
    pub fn builder() -> DependencyGraphBuilder {
        DependencyGraphBuilder::new()
    }

    /// Get the direct dependencies of a step.
    pub fn dependencies_of(&self, step: &str) -> Option<&HashSet<String>> {
        self.dependencies.get(step)
    }

    /// Check if a step exists in the graph.
    pub fn contains(&self, step: &str) -> bool {
        self.steps.contains(step)
    }

    /// Get all step ids.
    pub fn steps(&self) -> &HashSet<String> {
        &self.steps
    }

    /// Get the number of steps in the graph.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns steps in topological order (dependencies before dependents).
    ///
    /// When several steps are simultaneously unblocked the smallest id is
    /// emitted first, so the order depends only on the node and edge sets,
    /// never on insertion sequence.
    ///
    /// Returns an error if a cycle is detected.
    pub fn topological_order(&self) -> Result<Vec<String>> {
        // Count incoming edges for each node
        let mut in_degree: HashMap<&str, usize> = HashMap::new();
        for step in &self.steps {
            in_degree.insert(
                step.as_str(),
                self.dependencies.get(step).map_or(0, |d| d.len()),
            );
        }

        // Start with nodes that have no dependencies, smallest id first
        let mut ready: BinaryHeap<Reverse<&str>> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&step, _)| Reverse(step))
            .collect();

        let mut result = Vec::with_capacity(self.steps.len());

        while let Some(Reverse(step)) = ready.pop() {
            result.push(step.to_string());

            // Reduce in-degree for all dependents
            if let Some(dependents) = self.dependents.get(step) {
                for dependent in dependents {
                    if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                        *degree -= 1;
                        if *degree == 0 {
                            ready.push(Reverse(dependent.as_str()));
                        }
                    }
                }
            }
        }

        // If we haven't processed all nodes, there's a cycle
        if result.len() != self.steps.len() {
            let mut remaining: Vec<&str> = in_degree
                .iter()
                .filter(|(_, &d)| d > 0)
                .map(|(&s, _)| s)
                .collect();
            remaining.sort_unstable();

            return Err(CairnError::CircularDependency {
                cycle: remaining.join(" -> "),
            });
        }

        Ok(result)
    }

    /// Find a cycle in the graph, returning the path if one exists.
    ///
    /// A step that depends on itself is reported as a one-step cycle,
    /// e.g. `["a", "a"]`.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum State {
            Unvisited,
            Visiting,
            Visited,
        }

        let mut state: HashMap<&str, State> = self
            .steps
            .iter()
            .map(|s| (s.as_str(), State::Unvisited))
            .collect();

        let mut path: Vec<String> = Vec::new();

        fn dfs<'a>(
            node: &'a str,
            graph: &'a DependencyGraph,
            state: &mut HashMap<&'a str, State>,
            path: &mut Vec<String>,
        ) -> Option<Vec<String>> {
            state.insert(node, State::Visiting);
            path.push(node.to_string());

            if let Some(deps) = graph.dependencies.get(node) {
                for dep in deps {
                    match state.get(dep.as_str()) {
                        Some(State::Visiting) => {
                            // Found cycle - build the cycle path
                            let cycle_start = path.iter().position(|s| s == dep).unwrap();
                            let mut cycle: Vec<String> = path[cycle_start..].to_vec();
                            cycle.push(dep.clone());
                            return Some(cycle);
                        }
                        Some(State::Unvisited) | None => {
                            if let Some(cycle) = dfs(dep, graph, state, path) {
                                return Some(cycle);
                            }
                        }
                        Some(State::Visited) => {}
                    }
                }
            }

            path.pop();
            state.insert(node, State::Visited);
            None
        }

        let mut roots: Vec<&str> = self.steps.iter().map(String::as_str).collect();
        roots.sort_unstable();

        for step in roots {
            if state.get(step) == Some(&State::Unvisited) {
                if let Some(cycle) = dfs(step, self, &mut state, &mut path) {
                    return Some(cycle);
                }
            }
        }

        None
    }
}

/// Builder for constructing a DependencyGraph.
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    dependencies: HashMap<String, HashSet<String>>,
}

impl DependencyGraphBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step with its declared dependencies.
    ///
    /// Duplicate declarations of the same dependency collapse to one edge.
    pub fn add_step<I, S>(mut self, id: impl Into<String>, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies
            .entry(id.into())
            .or_default()
            .extend(depends_on.into_iter().map(Into::into));
        self
    }

    /// Build the dependency graph.
    ///
    /// Edges that name a step not added to the builder are dropped.
    pub fn build(self) -> DependencyGraph {
        let steps: HashSet<String> = self.dependencies.keys().cloned().collect();

        let mut dependencies: HashMap<String, HashSet<String>> = HashMap::new();
        let mut dependents: HashMap<String, HashSet<String>> = HashMap::new();
        for step in &steps {
            dependents.insert(step.clone(), HashSet::new());
        }

        for (step, deps) in self.dependencies {
            let known: HashSet<String> = deps.into_iter().filter(|d| steps.contains(d)).collect();
            for dep in &known {
                dependents.get_mut(dep).unwrap().insert(step.clone());
            }
            dependencies.insert(step, known);
        }

        DependencyGraph {
            dependencies,
            dependents,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_creates_empty_graph() {
        let graph = DependencyGraph::builder().build();
        assert!(graph.is_empty());
        assert!(graph.topological_order().unwrap().is_empty());
    }

    #[test]
    fn builder_adds_single_step_without_dependencies() {
        let graph = DependencyGraph::builder()
            .add_step("one", Vec::<String>::new())
            .build();

        assert!(graph.contains("one"));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.topological_order().unwrap(), vec!["one"]);
    }

    #[test]
    fn builder_drops_unknown_dependency_edges() {
        let graph = DependencyGraph::builder()
            .add_step("one", vec!["nonexistent"])
            .build();

        assert!(graph.contains("one"));
        assert!(!graph.contains("nonexistent"));
        assert!(graph.dependencies_of("one").unwrap().is_empty());

        // An unknown dependency constrains nothing
        assert_eq!(graph.topological_order().unwrap(), vec!["one"]);
    }

    #[test]
    fn builder_collapses_duplicate_edges() {
        let graph = DependencyGraph::builder()
            .add_step("one", vec!["two", "two"])
            .add_step("two", Vec::<String>::new())
            .build();

        assert_eq!(graph.dependencies_of("one").unwrap().len(), 1);
    }

    #[test]
    fn topo_sort_linear_chain() {
        let graph = DependencyGraph::builder()
            .add_step("one", vec!["two"])
            .add_step("two", vec!["three"])
            .add_step("three", Vec::<String>::new())
            .build();

        let order = graph.topological_order().unwrap();
        assert_eq!(order, vec!["three", "two", "one"]);
    }

    #[test]
    fn topo_sort_diamond_dependency() {
        let graph = DependencyGraph::builder()
            .add_step("one", vec!["two", "three"])
            .add_step("two", vec!["four"])
            .add_step("three", vec!["four"])
            .add_step("four", Vec::<String>::new())
            .build();

        let order = graph.topological_order().unwrap();

        let one = order.iter().position(|s| s == "one").unwrap();
        let two = order.iter().position(|s| s == "two").unwrap();
        let three = order.iter().position(|s| s == "three").unwrap();
        let four = order.iter().position(|s| s == "four").unwrap();

        assert!(four < two && two < one);
        assert!(four < three && three < one);
    }

    #[test]
    fn topo_sort_is_deterministic_across_insertion_orders() {
        let forward = DependencyGraph::builder()
            .add_step("alpha", Vec::<String>::new())
            .add_step("beta", Vec::<String>::new())
            .add_step("gamma", Vec::<String>::new())
            .build();
        let backward = DependencyGraph::builder()
            .add_step("gamma", Vec::<String>::new())
            .add_step("beta", Vec::<String>::new())
            .add_step("alpha", Vec::<String>::new())
            .build();

        assert_eq!(
            forward.topological_order().unwrap(),
            backward.topological_order().unwrap()
        );
        assert_eq!(
            forward.topological_order().unwrap(),
            vec!["alpha", "beta", "gamma"]
        );
    }

    #[test]
    fn topo_sort_detects_simple_cycle() {
        let graph = DependencyGraph::builder()
            .add_step("a", vec!["b"])
            .add_step("b", vec!["a"])
            .build();

        let err = graph.topological_order().unwrap_err();
        assert!(err.to_string().contains("Circular dependency"));
    }

    #[test]
    fn no_cycle_returns_none() {
        let graph = DependencyGraph::builder()
            .add_step("a", Vec::<String>::new())
            .add_step("b", vec!["a"])
            .build();

        assert!(graph.find_cycle().is_none());
    }

    #[test]
    fn simple_cycle_returns_path() {
        let graph = DependencyGraph::builder()
            .add_step("a", vec!["b"])
            .add_step("b", vec!["a"])
            .build();

        let path = graph.find_cycle().unwrap();
        assert!(path.len() >= 2);
        assert_eq!(path.first(), path.last());
    }

    #[test]
    fn longer_cycle_returns_full_path() {
        let graph = DependencyGraph::builder()
            .add_step("a", vec!["c"])
            .add_step("b", vec!["a"])
            .add_step("c", vec!["b"])
            .build();

        let path = graph.find_cycle().unwrap();
        assert!(path.contains(&"a".to_string()));
        assert!(path.contains(&"b".to_string()));
        assert!(path.contains(&"c".to_string()));
    }

    #[test]
    fn self_dependency_is_a_one_step_cycle() {
        let graph = DependencyGraph::builder().add_step("a", vec!["a"]).build();

        assert_eq!(graph.find_cycle().unwrap(), vec!["a", "a"]);
        assert!(graph.topological_order().is_err());
    }
}
