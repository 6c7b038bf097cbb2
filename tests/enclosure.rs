use enclosure::{
    Config, ElementKind, Error, FenceKind, FenceTool, Input, Objective, Outcome, PlanId, Status,
    Violation, Workspace,
    cartesian::{self, Point},
    cartesian_point,
};

const PLAN: PlanId = PlanId(1);

/// Draws the fences A, B, C and D of a 1x1 meter square, returning their ids.
fn unit_square(workspace: &mut Workspace) -> Vec<enclosure::FenceId> {
    workspace.open(PLAN);

    [[0., 0.], [100., 0.], [100., 100.], [0., 100.], [0., 0.]]
        .windows(2)
        .map(|pair| {
            workspace
                .add_fence(PLAN, &pair[0].into(), &pair[1].into())
                .expect("square fences should be valid")
        })
        .collect()
}

#[test]
fn square_scenario() {
    let mut workspace = Workspace::default();
    let fences = unit_square(&mut workspace);

    assert!(workspace.is_closed(PLAN).unwrap());
    assert!((workspace.enclosed_area(PLAN).unwrap() - 1.).abs() < 1e-6);
    assert_eq!(workspace.plan(PLAN).unwrap().status(), Status::Enclosed);

    let removal = workspace.remove_fence(PLAN, fences[1]).unwrap();
    assert!(removal.was_enclosed);
    assert!(!workspace.is_closed(PLAN).unwrap());
    assert_eq!(workspace.enclosed_area(PLAN).unwrap(), 0.);
    assert_eq!(workspace.plan(PLAN).unwrap().status(), Status::Broken);

    workspace
        .add_fence(PLAN, &cartesian_point!(100., 0.), &cartesian_point!(100., 100.))
        .unwrap();
    assert_eq!(workspace.plan(PLAN).unwrap().status(), Status::Enclosed);
}

#[test]
fn unfinished_square_is_not_closed() {
    let mut workspace = Workspace::default();
    workspace.open(PLAN);

    [[0., 0.], [100., 0.], [100., 100.], [0., 100.]]
        .windows(2)
        .for_each(|pair| {
            workspace
                .add_fence(PLAN, &pair[0].into(), &pair[1].into())
                .unwrap();
        });

    assert!(!workspace.is_closed(PLAN).unwrap());
    assert_eq!(workspace.plan(PLAN).unwrap().status(), Status::Construction);
}

#[test]
fn point_in_square() {
    let mut workspace = Workspace::default();
    unit_square(&mut workspace);

    struct Test {
        name: &'static str,
        point: Point,
        want: bool,
    }

    vec![
        Test {
            name: "center",
            point: cartesian_point!(50., 50.),
            want: true,
        },
        Test {
            name: "outside",
            point: cartesian_point!(150., 50.),
            want: false,
        },
        Test {
            name: "on the left edge",
            point: cartesian_point!(0., 50.),
            want: true,
        },
        Test {
            name: "on the right edge",
            point: cartesian_point!(100., 50.),
            want: false,
        },
    ]
    .into_iter()
    .for_each(|test| {
        for _ in 0..3 {
            let got = workspace.is_point_in_enclosure(PLAN, &test.point).unwrap();
            assert_eq!(got, test.want, "{}", test.name);
        }
    });
}

#[test]
fn element_placement_in_square() {
    let mut workspace = Workspace::default();
    unit_square(&mut workspace);

    assert_eq!(
        workspace.validate_element_placement(PLAN, &cartesian_point!(40., 80.), 20., 40.),
        Err(Error::InvalidPlacement(Violation::Overlap)),
        "crossing fence C"
    );

    assert_eq!(
        workspace.validate_element_placement(PLAN, &cartesian_point!(40., 40.), 20., 20.),
        Ok(()),
        "inside, away from every fence"
    );

    let waterer = workspace
        .place_element(PLAN, ElementKind::Waterer, &cartesian_point!(30., 30.))
        .unwrap();

    let mut ledger = std::collections::BTreeMap::<(PlanId, Objective), f64>::new();
    workspace.publish(PLAN, &mut ledger).unwrap();
    assert_eq!(ledger[&(PLAN, Objective::Waterer)], 1.);

    workspace.remove_element(PLAN, waterer).unwrap();
    workspace.publish(PLAN, &mut ledger).unwrap();
    assert_eq!(ledger[&(PLAN, Objective::Waterer)], 0.);
}

#[test]
fn minimum_angle() {
    struct Test {
        name: &'static str,
        degrees: f64,
        want: Result<(), Violation>,
    }

    vec![
        Test {
            name: "ten degrees",
            degrees: 10.,
            want: Err(Violation::Angle),
        },
        Test {
            name: "twenty degrees",
            degrees: 20.,
            want: Ok(()),
        },
    ]
    .into_iter()
    .for_each(|test| {
        let mut workspace = Workspace::default();
        workspace.open(PLAN);
        workspace
            .add_fence(PLAN, &cartesian_point!(0., 0.), &cartesian_point!(500., 0.))
            .unwrap();

        let (sin, cos) = test.degrees.to_radians().sin_cos();
        let end = cartesian_point!(500. * cos, 500. * sin);

        let graph = workspace.plan(PLAN).unwrap().graph();
        let got = graph.validate_fence_placement(&cartesian_point!(0., 0.), &end);
        assert_eq!(got, test.want, "{}", test.name);
    });
}

#[test]
fn shared_endpoints_do_not_intersect() {
    let tolerance = Config::default().tolerance();
    let origin = cartesian_point!(0., 0.);
    let jittered = cartesian_point!(0.0004, -0.0003);

    let a = [&origin, &cartesian_point!(100., 0.)];
    let b = [&origin, &cartesian_point!(0., 100.)];
    let c = [&jittered, &cartesian_point!(0., 100.)];

    assert!(!cartesian::segments_intersect(a, b, &tolerance));
    assert!(!cartesian::segments_intersect(a, c, &tolerance));
}

#[test]
fn replaying_persisted_plan() {
    let mut workspace = Workspace::default();
    let plan = workspace.open(PLAN);

    [[0., 0.], [300., 0.], [300., 300.], [0., 300.], [0., 0.]]
        .windows(2)
        .for_each(|pair| {
            plan.restore_fence(&pair[0].into(), &pair[1].into(), FenceKind::Standard)
                .unwrap();
        });

    plan.restore_element(ElementKind::Shelter, &cartesian_point!(50., 50.), 100., 100., 1.)
        .unwrap();

    assert_eq!(plan.status(), Status::Enclosed);
    assert_eq!(plan.elements().count(), 1);
    assert!((plan.graph().enclosed_area() - 9.).abs() < 1e-6);
}

#[test]
fn drawing_with_the_tool() {
    let mut workspace = Workspace::default();
    workspace.open(PLAN);
    let mut tool = FenceTool::default();

    let strokes = [
        ([0., 0.], [100., 0.]),
        ([102., 3.], [100., 100.]),
        ([97., 104.], [0., 100.]),
        ([4., 98.], [1., 2.]),
    ];

    for (down, up) in strokes {
        let graph = workspace.plan(PLAN).unwrap().graph();
        tool.handle(Input::Down(down.into()), graph);
        let Outcome::Committed { from, to } = tool.handle(Input::Up(up.into()), graph) else {
            panic!("every stroke should commit a fence");
        };

        workspace.add_fence(PLAN, &from, &to).unwrap();
    }

    assert!(workspace.is_closed(PLAN).unwrap());
    assert!((workspace.enclosed_area(PLAN).unwrap() - 1.).abs() < 1e-6);
}
