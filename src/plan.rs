//! A single plan: its fences, its elements and the lifecycle of its enclosure.

use std::{collections::BTreeMap, fmt};

use crate::{
    Config, Element, ElementId, ElementKind, Error, Fence, FenceId, FenceKind, Graph, Objective,
    Removal, Split, VertexId, Violation,
    cartesian::{Point, Rect},
};

/// The identity of a [`Plan`], as known by the external record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanId(pub u64);

impl From<u64> for PlanId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// The lifecycle state of the enclosure of a [`Plan`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The fences have never formed an enclosure.
    #[default]
    Construction,
    /// The fences form a single closed enclosure.
    Enclosed,
    /// The fences did form an enclosure, but no longer do.
    Broken,
}

impl Status {
    /// Returns the status following self given whether the fences are currently enclosing.
    fn next(self, enclosed: bool) -> Self {
        match (self, enclosed) {
            (Status::Construction | Status::Broken, true) => Status::Enclosed,
            (Status::Enclosed, false) => Status::Broken,
            (status, _) => status,
        }
    }
}

/// The fences and elements of a single plan.
#[derive(Debug, Clone)]
pub struct Plan {
    id: PlanId,
    graph: Graph,
    elements: Vec<Option<Element>>,
    status: Status,
}

impl Plan {
    pub fn new(id: PlanId, config: Config) -> Self {
        Self {
            id,
            graph: Graph::new(config),
            elements: Vec::new(),
            status: Status::default(),
        }
    }

    pub fn id(&self) -> PlanId {
        self.id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)?.as_ref()
    }

    /// Returns an iterator over all the elements in the plan.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|element| (ElementId(index), element)))
    }

    /// Returns the rectangle currently covered by the given element.
    pub fn element_rect(&self, id: ElementId) -> Option<Rect> {
        let element = self.element(id)?;
        let top_left = self.graph.registry().position(element.anchor)?;
        Some(Rect::new(top_left, element.width, element.height))
    }

    /// See [`Graph::add_fence`].
    pub fn add_fence(&mut self, start: &Point, end: &Point) -> Result<FenceId, Error> {
        let id = self.graph.add_fence(start, end)?;
        self.settle();
        Ok(id)
    }

    /// See [`Graph::restore_fence`].
    pub fn restore_fence(
        &mut self,
        start: &Point,
        end: &Point,
        kind: FenceKind,
    ) -> Result<FenceId, Error> {
        let id = self.graph.restore_fence(start, end, kind)?;
        self.settle();
        Ok(id)
    }

    /// See [`Graph::remove_fence`].
    pub fn remove_fence(&mut self, id: FenceId) -> Result<Removal, Error> {
        let removal = self.graph.remove_fence(id)?;
        self.settle();
        Ok(removal)
    }

    /// See [`Graph::split_fence`].
    pub fn split_fence(&mut self, id: FenceId, at: &Point) -> Result<Split, Error> {
        let split = self.graph.split_fence(id, at)?;
        self.settle();
        Ok(split)
    }

    /// See [`Graph::replace_endpoint`].
    pub fn replace_endpoint(
        &mut self,
        id: FenceId,
        old: VertexId,
        new: VertexId,
    ) -> Result<Fence, Error> {
        let fence = *self.graph.replace_endpoint(id, old, new)?;
        self.settle();
        Ok(fence)
    }

    /// See [`Graph::move_vertex`].
    ///
    /// When the vertex anchors an element, the element moves with it and must keep satisfying
    /// the same rules as when it was placed. Nothing changes on error.
    pub fn move_vertex(&mut self, id: VertexId, to: &Point) -> Result<(), Error> {
        let anchored = self
            .elements()
            .find(|(_, element)| element.anchor == id)
            .map(|(element, anchored)| (element, anchored.width, anchored.height));

        if let Some((element, width, height)) = anchored
            && let Err(error) = self.validate_rect(&to.round(), width, height)
        {
            tracing::trace!(%error, %element, ?to, "element move rejected");
            return Err(error);
        }

        self.graph.move_vertex(id, to)?;
        self.settle();
        Ok(())
    }

    /// See [`Graph::set_fence_kind`].
    pub fn set_fence_kind(&mut self, id: FenceId, kind: FenceKind) -> Result<(), Error> {
        self.graph.set_fence_kind(id, kind)
    }

    /// Checks whether an element of the given kind, with its default size, could be placed at
    /// the given point.
    ///
    /// The plan must be enclosed, the element must not overlap any fence, and its center must
    /// be inside the enclosure.
    pub fn validate_element(&self, kind: ElementKind, top_left: &Point) -> Result<(), Error> {
        let properties = kind.properties().ok_or(Error::NotPlaceable(kind))?;
        self.validate_rect(top_left, properties.width, properties.height)
    }

    /// Places an element of the given kind, with its default properties, at the given point.
    pub fn place_element(
        &mut self,
        kind: ElementKind,
        top_left: &Point,
    ) -> Result<ElementId, Error> {
        if let Err(error) = self.validate_element(kind, top_left) {
            tracing::trace!(%error, %kind, ?top_left, "element rejected");
            return Err(error);
        }

        let properties = kind.properties().ok_or(Error::NotPlaceable(kind))?;
        Ok(self.insert(
            kind,
            top_left,
            properties.width,
            properties.height,
            properties.objective_value,
        ))
    }

    /// Places an element without validating its placement.
    ///
    /// Meant for replaying elements that were already validated before being persisted.
    pub fn restore_element(
        &mut self,
        kind: ElementKind,
        top_left: &Point,
        width: f64,
        height: f64,
        objective_value: f64,
    ) -> Result<ElementId, Error> {
        if kind.properties().is_none() {
            return Err(Error::NotPlaceable(kind));
        }

        Ok(self.insert(kind, top_left, width, height, objective_value))
    }

    /// Removes the given element, releasing its anchor vertex.
    pub fn remove_element(&mut self, id: ElementId) -> Result<Element, Error> {
        let element = self
            .elements
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(Error::UnknownElement(id))?;

        self.graph.release(element.anchor);
        tracing::debug!(plan = %self.id, element = %id, kind = %element.kind, "element removed");
        Ok(element)
    }

    /// Returns the current value of every objective.
    ///
    /// The area is zero unless the fences form an enclosure.
    pub fn objectives(&self) -> BTreeMap<Objective, f64> {
        let mut objectives: BTreeMap<Objective, f64> = Objective::ALL
            .into_iter()
            .map(|objective| (objective, 0.))
            .collect();

        objectives.insert(Objective::Area, self.graph.enclosed_area());
        self.elements()
            .filter_map(|(_, element)| element.contributions())
            .flatten()
            .for_each(|(objective, value)| {
                *objectives.entry(objective).or_default() += value;
            });

        objectives
    }

    fn insert(
        &mut self,
        kind: ElementKind,
        top_left: &Point,
        width: f64,
        height: f64,
        objective_value: f64,
    ) -> ElementId {
        let id = ElementId(self.elements.len());
        let anchor = self.graph.anchor(top_left);
        self.elements.push(Some(Element {
            kind,
            anchor,
            width,
            height,
            objective_value,
        }));

        tracing::debug!(plan = %self.id, element = %id, %kind, %anchor, "element placed");
        id
    }

    /// Checks the rectangle of an element against the enclosure and its fences.
    fn validate_rect(&self, top_left: &Point, width: f64, height: f64) -> Result<(), Error> {
        if self.status != Status::Enclosed {
            return Err(Error::NotEnclosed);
        }

        self.graph
            .validate_element_placement(top_left, width, height)?;

        let center = Rect::new(*top_left, width, height).center();
        if !self.graph.is_point_in_enclosure(&center) {
            return Err(Violation::Outside.into());
        }

        Ok(())
    }

    /// Updates the status of the plan after a structural change of its fences.
    fn settle(&mut self) {
        let status = self.status.next(self.graph.is_enclosed());
        if status != self.status {
            tracing::info!(
                plan = %self.id,
                from = ?self.status,
                to = ?status,
                "plan status changed"
            );
            self.status = status;
        }
    }
}
