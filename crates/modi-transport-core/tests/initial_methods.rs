use modi_transport_core::initial::build_initial;
use modi_transport_core::verify::check_conservation;
use modi_transport_core::{solve, InitialMethod, TransportError, TransportOptions, TransportProblem};

const METHODS: [InitialMethod; 3] = [
    InitialMethod::MatrixMinimum,
    InitialMethod::NorthwestCorner,
    InitialMethod::Vogel,
];

fn warehouse_problem() -> TransportProblem {
    TransportProblem::new(
        vec![7, 9, 18],
        vec![5, 8, 7, 14],
        vec![
            vec![19, 30, 50, 10],
            vec![70, 30, 40, 60],
            vec![40, 8, 70, 20],
        ],
    )
    .unwrap()
}

fn options(initial: InitialMethod) -> TransportOptions {
    TransportOptions {
        initial,
        check_invariants: true,
        ..TransportOptions::default()
    }
}

#[test]
fn every_start_is_feasible() {
    let problem = warehouse_problem();
    for method in METHODS {
        let allocation = build_initial(&problem, method);
        assert!(
            check_conservation(&problem, &allocation).is_ok(),
            "{method:?} broke conservation"
        );
    }
}

#[test]
fn every_start_reaches_the_same_optimum() {
    let problem = warehouse_problem();
    let expected = vec![vec![5, 0, 0, 2], vec![0, 2, 7, 0], vec![0, 6, 0, 12]];
    for method in METHODS {
        let solution = solve(&problem, &options(method)).unwrap();
        assert!(solution.is_optimal(), "{method:?} did not converge");
        assert_eq!(solution.allocation.to_rows(), expected, "{method:?}");
        assert_eq!(solution.total_cost, 743.0, "{method:?}");
    }
}

#[test]
fn better_starts_need_fewer_iterations() {
    let problem = warehouse_problem();
    let northwest = solve(&problem, &options(InitialMethod::NorthwestCorner)).unwrap();
    let minimum = solve(&problem, &options(InitialMethod::MatrixMinimum)).unwrap();
    let vogel = solve(&problem, &options(InitialMethod::Vogel)).unwrap();

    assert_eq!(northwest.stats.initial_cost, 1015.0);
    assert_eq!(minimum.stats.initial_cost, 814.0);
    assert_eq!(vogel.stats.initial_cost, 779.0);
    assert_eq!(vogel.stats.iterations, 2);
    assert_eq!(minimum.stats.iterations, 3);
    assert_eq!(northwest.stats.iterations, 3);
}

#[test]
fn northwest_start_walks_a_long_way_on_depot_network() {
    let problem = TransportProblem::new(
        vec![20, 20, 20, 20],
        vec![19, 19, 19, 19, 4],
        vec![
            vec![15, 1, 22, 19, 1],
            vec![21, 18, 11, 4, 3],
            vec![26, 29, 23, 26, 24],
            vec![21, 10, 3, 19, 27],
        ],
    )
    .unwrap();
    let solution = solve(&problem, &options(InitialMethod::NorthwestCorner)).unwrap();
    assert!(solution.is_optimal());
    assert_eq!(solution.stats.initial_cost, 1513.0);
    assert_eq!(solution.stats.iterations, 8);
    assert_eq!(solution.total_cost, 684.0);
}

#[test]
fn northwest_pivots_into_degenerate_basis() {
    let problem = TransportProblem::new(
        vec![20, 30, 50],
        vec![30, 40, 30],
        vec![vec![8, 6, 10], vec![9, 12, 13], vec![14, 9, 16]],
    )
    .unwrap();
    let err = solve(&problem, &options(InitialMethod::NorthwestCorner)).unwrap_err();
    assert!(matches!(
        err,
        TransportError::PotentialsUndetermined { iteration: 2, .. }
    ));
}
