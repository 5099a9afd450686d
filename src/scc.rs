use crate::bipartite::Vertex;
use crate::digraph::Digraph;
use crate::error::{Error, OracleError};
use log::trace;
use std::collections::{BTreeMap, BTreeSet};

/// Splits a digraph into its strongly connected components. Every vertex must
/// end up in exactly one component; component order is unspecified.
pub trait SccOracle<V: Vertex> {
    fn strongly_connected_components(
        &self,
        digraph: &Digraph<V>,
    ) -> Result<Vec<BTreeSet<V>>, OracleError>;
}

impl<V, F> SccOracle<V> for F
where
    V: Vertex,
    F: Fn(&Digraph<V>) -> Result<Vec<BTreeSet<V>>, OracleError>,
{
    fn strongly_connected_components(
        &self,
        digraph: &Digraph<V>,
    ) -> Result<Vec<BTreeSet<V>>, OracleError> {
        self(digraph)
    }
}

/**
 * Tarjan's algorithm, with an explicit call stack in place of recursion.
 *
 * Each call-stack entry holds a vertex, and the position of the next
 * successor to visit. A vertex is the root of a component when its low-link
 * equals its visit order, at which point the component is popped off the
 * path stack.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tarjan;

const NOT_VISITED: usize = 0;

impl<V: Vertex> SccOracle<V> for Tarjan {
    fn strongly_connected_components(
        &self,
        digraph: &Digraph<V>,
    ) -> Result<Vec<BTreeSet<V>>, OracleError> {
        let nodes: Vec<&V> = digraph.vertices().collect();
        let index: BTreeMap<&V, usize> = nodes.iter().enumerate().map(|(i, v)| (*v, i)).collect();

        let mut successors: Vec<Vec<usize>> = Vec::with_capacity(nodes.len());
        for v in nodes.iter() {
            let ss = digraph
                .successors(v)?
                .iter()
                .map(|s| index.get(s).copied().ok_or_else(|| Error::unknown(s)))
                .collect::<Result<Vec<_>, _>>()?;
            successors.push(ss);
        }

        let n = nodes.len();
        let mut order_count = NOT_VISITED + 1;
        let mut order = vec![NOT_VISITED; n];
        let mut low_link = vec![NOT_VISITED; n];
        let mut on_stack = vec![false; n];
        let mut path_stack: Vec<usize> = Vec::new();
        let mut call_stack: Vec<(usize, usize)> = Vec::new();
        let mut components: Vec<BTreeSet<V>> = Vec::new();

        for start in 0..n {
            if order[start] != NOT_VISITED {
                continue;
            }
            order[start] = order_count;
            low_link[start] = order_count;
            order_count += 1;
            path_stack.push(start);
            on_stack[start] = true;
            call_stack.push((start, 0));

            while let Some(&(u, pos)) = call_stack.last() {
                if pos < successors[u].len() {
                    let top = call_stack.len() - 1;
                    call_stack[top].1 += 1;

                    let v = successors[u][pos];
                    if order[v] == NOT_VISITED {
                        order[v] = order_count;
                        low_link[v] = order_count;
                        order_count += 1;
                        path_stack.push(v);
                        on_stack[v] = true;
                        call_stack.push((v, 0));
                    } else if on_stack[v] {
                        low_link[u] = low_link[u].min(order[v]);
                    }
                    continue;
                }

                call_stack.pop();
                if let Some(&(parent, _)) = call_stack.last() {
                    low_link[parent] = low_link[parent].min(low_link[u]);
                }

                // u is a root node, so pop the stack and generate an scc
                if low_link[u] == order[u] {
                    let mut component = BTreeSet::new();
                    while let Some(w) = path_stack.pop() {
                        on_stack[w] = false;
                        component.insert(nodes[w].clone());
                        if w == u {
                            break;
                        }
                    }
                    trace!("component {}: {:?}", components.len(), component);
                    components.push(component);
                }
            }
        }

        Ok(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digraph(n: u32, arcs: &[(u32, u32)]) -> Digraph<u32> {
        let mut d = Digraph::new();
        for v in 0..n {
            d.add_vertex(v);
        }
        for &(u, v) in arcs {
            d.add_arc(u, v).unwrap();
        }
        d
    }

    fn sorted(components: Vec<BTreeSet<u32>>) -> Vec<Vec<u32>> {
        let mut cs: Vec<Vec<u32>> = components
            .into_iter()
            .map(|c| c.into_iter().collect())
            .collect();
        cs.sort();
        cs
    }

    #[test]
    fn isolated_vertices_are_singletons() {
        let d = digraph(3, &[]);
        let cs = Tarjan.strongly_connected_components(&d).unwrap();
        assert_eq!(sorted(cs), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn dag_has_only_singletons() {
        let d = digraph(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
        let cs = Tarjan.strongly_connected_components(&d).unwrap();
        assert_eq!(cs.len(), 4);
    }

    #[test]
    fn cycles_are_merged() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3, 3 <-> 4, 5 alone
        let d = digraph(6, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 3)]);
        let cs = Tarjan.strongly_connected_components(&d).unwrap();
        assert_eq!(sorted(cs), vec![vec![0, 1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn long_path_does_not_recurse() {
        let n = 100_000;
        let arcs: Vec<(u32, u32)> = (0..n - 1).map(|i| (i, i + 1)).chain([(n - 1, 0)]).collect();
        let d = digraph(n, &arcs);
        let cs = Tarjan.strongly_connected_components(&d).unwrap();
        assert_eq!(cs.len(), 1);
        assert_eq!(cs[0].len(), n as usize);
    }
}
