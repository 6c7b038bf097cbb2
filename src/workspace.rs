//! The entry point of a session controller: every open plan, keyed by its id.

use std::collections::{BTreeMap, HashMap};

use crate::{
    Config, Element, ElementId, ElementKind, Error, Fence, FenceId, Objective, Plan, PlanId,
    Removal, Split, VertexId, cartesian::Point,
};

/// A sink for the values of the objectives of each plan.
pub trait Ledger {
    /// Records the current value of the given objective for the given plan.
    fn record(&mut self, plan: PlanId, objective: Objective, value: f64);
}

impl Ledger for BTreeMap<(PlanId, Objective), f64> {
    fn record(&mut self, plan: PlanId, objective: Objective, value: f64) {
        self.insert((plan, objective), value);
    }
}

impl Ledger for HashMap<(PlanId, Objective), f64> {
    fn record(&mut self, plan: PlanId, objective: Objective, value: f64) {
        self.insert((plan, objective), value);
    }
}

/// A set of plans sharing the same [`Config`].
#[derive(Debug, Default, Clone)]
pub struct Workspace {
    config: Config,
    plans: BTreeMap<PlanId, Plan>,
}

impl Workspace {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            plans: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the plan with the given id, creating an empty one if it is not open yet.
    pub fn open(&mut self, id: PlanId) -> &mut Plan {
        let config = self.config;
        self.plans.entry(id).or_insert_with(|| {
            tracing::debug!(plan = %id, "plan opened");
            Plan::new(id, config)
        })
    }

    /// Removes the given plan from the workspace, returning it if it was open.
    pub fn close(&mut self, id: PlanId) -> Option<Plan> {
        self.plans.remove(&id)
    }

    pub fn plan(&self, id: PlanId) -> Result<&Plan, Error> {
        self.plans.get(&id).ok_or(Error::UnknownPlan(id))
    }

    pub fn plan_mut(&mut self, id: PlanId) -> Result<&mut Plan, Error> {
        self.plans.get_mut(&id).ok_or(Error::UnknownPlan(id))
    }

    pub fn plans(&self) -> impl Iterator<Item = &Plan> {
        self.plans.values()
    }

    pub fn add_fence(
        &mut self,
        plan: PlanId,
        start: &Point,
        end: &Point,
    ) -> Result<FenceId, Error> {
        self.plan_mut(plan)?.add_fence(start, end)
    }

    pub fn remove_fence(&mut self, plan: PlanId, fence: FenceId) -> Result<Removal, Error> {
        self.plan_mut(plan)?.remove_fence(fence)
    }

    pub fn split_fence(
        &mut self,
        plan: PlanId,
        fence: FenceId,
        at: &Point,
    ) -> Result<Split, Error> {
        self.plan_mut(plan)?.split_fence(fence, at)
    }

    pub fn replace_endpoint(
        &mut self,
        plan: PlanId,
        fence: FenceId,
        old: VertexId,
        new: VertexId,
    ) -> Result<Fence, Error> {
        self.plan_mut(plan)?.replace_endpoint(fence, old, new)
    }

    pub fn is_closed(&self, plan: PlanId) -> Result<bool, Error> {
        Ok(self.plan(plan)?.graph().is_closed())
    }

    pub fn enclosed_area(&self, plan: PlanId) -> Result<f64, Error> {
        Ok(self.plan(plan)?.graph().enclosed_area())
    }

    pub fn is_point_in_enclosure(&self, plan: PlanId, point: &Point) -> Result<bool, Error> {
        Ok(self.plan(plan)?.graph().is_point_in_enclosure(point))
    }

    pub fn validate_element_placement(
        &self,
        plan: PlanId,
        top_left: &Point,
        width: f64,
        height: f64,
    ) -> Result<(), Error> {
        self.plan(plan)?
            .graph()
            .validate_element_placement(top_left, width, height)
            .map_err(Error::from)
    }

    pub fn place_element(
        &mut self,
        plan: PlanId,
        kind: ElementKind,
        top_left: &Point,
    ) -> Result<ElementId, Error> {
        self.plan_mut(plan)?.place_element(kind, top_left)
    }

    pub fn remove_element(&mut self, plan: PlanId, element: ElementId) -> Result<Element, Error> {
        self.plan_mut(plan)?.remove_element(element)
    }

    /// Pushes the current value of every objective of the given plan into the ledger.
    pub fn publish(&self, plan: PlanId, ledger: &mut impl Ledger) -> Result<(), Error> {
        self.plan(plan)?
            .objectives()
            .into_iter()
            .for_each(|(objective, value)| ledger.record(plan, objective, value));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{Config, ElementKind, Error, Objective, PlanId, Workspace, cartesian_point};

    #[test]
    fn unknown_plan() {
        let mut workspace = Workspace::default();
        let plan = PlanId(7);

        assert_eq!(workspace.is_closed(plan), Err(Error::UnknownPlan(plan)));
        assert_eq!(
            workspace
                .add_fence(plan, &cartesian_point!(0., 0.), &cartesian_point!(1., 0.))
                .map(|_| ()),
            Err(Error::UnknownPlan(plan))
        );
    }

    #[test]
    fn plans_are_independent() {
        let mut workspace = Workspace::default();
        let [first, second] = [PlanId(1), PlanId(2)];
        workspace.open(first);
        workspace.open(second);

        workspace
            .add_fence(first, &cartesian_point!(0., 0.), &cartesian_point!(100., 0.))
            .unwrap();

        assert_eq!(workspace.plan(first).unwrap().graph().fence_count(), 1);
        assert_eq!(workspace.plan(second).unwrap().graph().fence_count(), 0);
        assert!(workspace.close(second).is_some());
        assert_eq!(workspace.plans().count(), 1);
    }

    #[test]
    fn publish() {
        let mut workspace = Workspace::new(Config::default().with_pixels_per_meter(10.));
        let plan = PlanId(3);
        workspace.open(plan);

        [[0., 0.], [100., 0.], [100., 100.], [0., 100.], [0., 0.]]
            .windows(2)
            .for_each(|pair| {
                workspace
                    .add_fence(plan, &pair[0].into(), &pair[1].into())
                    .unwrap();
            });

        workspace
            .place_element(plan, ElementKind::Waterer, &cartesian_point!(30., 30.))
            .unwrap();

        let mut ledger: BTreeMap<(PlanId, Objective), f64> = BTreeMap::new();
        workspace.publish(plan, &mut ledger).unwrap();

        assert_eq!(ledger.len(), Objective::ALL.len());
        assert!((ledger[&(plan, Objective::Area)] - 100.).abs() < 1e-6);
        assert_eq!(ledger[&(plan, Objective::Waterer)], 1.);
        assert_eq!(ledger[&(plan, Objective::Dustbath)], 0.);
    }
}
