//! Enumeration and end-to-end checks through the public API.

use std::collections::HashSet;

use longpath::graph::io::{format_graph, parse_graph, parse_path};
use longpath::heuristics::BruteForce;
use longpath::prelude::*;

const PETERSEN: &str = "\
0 1 4 5
1 0 2 6
2 1 3 7
3 2 4 8
4 3 0 9
5 0 7 8
6 1 8 9
7 2 5 9
8 3 5 6
9 4 6 7
";

/// Count ordered simple paths of two or more vertices by depth-first search.
fn count_simple_paths(graph: &Graph) -> usize {
    fn walk(graph: &Graph, current: VertexId, visited: &mut HashSet<VertexId>) -> usize {
        let mut total = 0;
        for &next in graph.neighbours_of(current) {
            if graph.contains(next) && visited.insert(next) {
                total += 1 + walk(graph, next, visited);
                visited.remove(&next);
            }
        }
        total
    }

    graph
        .vertices()
        .iter()
        .map(|v| walk(graph, v.id, &mut HashSet::from([v.id])))
        .sum()
}

fn longest_by_dfs(graph: &Graph) -> usize {
    fn walk(graph: &Graph, current: VertexId, visited: &mut HashSet<VertexId>) -> usize {
        let mut best = visited.len();
        for &next in graph.neighbours_of(current) {
            if graph.contains(next) && visited.insert(next) {
                best = best.max(walk(graph, next, visited));
                visited.remove(&next);
            }
        }
        best
    }

    graph
        .vertices()
        .iter()
        .map(|v| walk(graph, v.id, &mut HashSet::from([v.id])))
        .max()
        .unwrap_or(0)
}

#[test]
fn test_enumeration_matches_dfs_count() {
    let graphs = [
        "1 2 4\n2 1 3 4\n3 2 4\n4 3 1 2\n",
        "0 1\n1 0 2\n2 1 3\n3 2\n",
        "0 1 2 3\n1 0\n2 0\n3 0\n",
        "5 6\n6 5 7\n7 6 5\n",
    ];

    for text in graphs {
        let graph = parse_graph(text).unwrap();
        let enumerated: Vec<GraphPath> = graph.all_paths().collect();
        assert_eq!(enumerated.len(), count_simple_paths(&graph), "graph:\n{text}");
        assert!(enumerated.iter().all(|p| graph.is_valid(p)));

        let distinct: HashSet<Vec<VertexId>> =
            enumerated.iter().map(|p| p.vertices().to_vec()).collect();
        assert_eq!(distinct.len(), enumerated.len());
    }
}

#[test]
fn test_next_path_walks_the_enumeration() {
    let graph = parse_graph("1 2 4\n2 1 3 4\n3 2 4\n4 3 1 2\n").unwrap();
    let codec = graph.codec();
    let all: Vec<GraphPath> = graph.all_paths().collect();

    // The path encoding to max_path wraps to zero under next().
    for pair in all
        .windows(2)
        .filter(|pair| codec.encode(&pair[1]).map_or(false, |n| &n < codec.max_path()))
    {
        assert_eq!(codec.next(&graph, &pair[0]).unwrap().as_ref(), Some(&pair[1]));
    }
}

#[test]
fn test_codec_round_trips_every_enumerated_path() {
    let graph = parse_graph("0 1 2\n1 0 2\n2 0 1 3\n3 2\n").unwrap();
    let codec = graph.codec();
    for path in graph.all_paths() {
        let n = codec.encode(&path).unwrap();
        assert_eq!(codec.decode(&n), Some(path));
    }
}

#[test]
fn test_brute_force_finds_petersen_longest_path() {
    let graph = parse_graph(PETERSEN).unwrap();
    assert_eq!(longest_by_dfs(&graph), 10);

    let small = parse_graph("0 1 3\n1 0 2\n2 1 3\n3 2 0 4\n4 3\n").unwrap();
    let run = BruteForce.solve(&small, &mut EvoRng::new(1)).unwrap();
    assert_eq!(run.goal(), longest_by_dfs(&small));
    assert!(small.is_valid(&run.best));
}

#[test]
fn test_genetic_search_on_petersen_graph() {
    let graph = parse_graph(PETERSEN).unwrap();
    let config = SolverConfig::builder().population_size(40).generations(30).build();
    let outcome = GeneticProgram::new(
        config.population_size,
        config.generations,
        GeneticIterator::new(config.genetic).with_sink(silent_sink()),
    )
    .solve(&graph, &mut EvoRng::new(config.seed))
    .unwrap();

    assert!(graph.is_valid(&outcome.best));
    assert!(fitness(&outcome.best) <= graph.vertex_count());
    assert!(outcome.generations <= 30);
}

#[test]
fn test_islands_on_petersen_graph() {
    let graph = parse_graph(PETERSEN).unwrap();
    let config = SolverConfig::builder()
        .population_size(20)
        .generations(15)
        .island_count(4)
        .build();
    let iterators = (0..config.islands.count)
        .map(|_| GeneticIterator::new(config.genetic).with_sink(silent_sink()))
        .collect();
    let outcome = IslandsModel::new(
        &graph,
        iterators,
        IslandSettings::from(&config),
        EvoRng::new(config.seed),
    )
    .unwrap()
    .solve()
    .unwrap();

    assert!(graph.is_valid(&outcome.best));
    assert_eq!(outcome.generations, 15);
}

#[test]
fn test_graph_text_round_trip() {
    let graph = parse_graph(PETERSEN).unwrap();
    let text = format_graph(&graph);
    let again = parse_graph(&text).unwrap();
    assert_eq!(again.vertex_count(), 10);
    assert_eq!(format_graph(&again), text);
    assert_eq!(again.vertices(), graph.vertices());

    let path = parse_path("0 1 2 3 4 9 7 5 8 6").unwrap();
    assert!(graph.is_valid(&path));
    assert_eq!(fitness(&path), 10);
}

#[test]
fn test_malformed_graph_is_rejected() {
    assert!(matches!(parse_graph(""), Err(EvoError::EmptyGraph)));
    assert!(matches!(
        parse_graph("0 1\n1 zero\n"),
        Err(EvoError::Parse { line: 2, .. })
    ));
    assert!(matches!(
        parse_graph("0 1\n0 1\n"),
        Err(EvoError::DuplicateVertex(0))
    ));
}
