//! The state machine of the fence drawing tool.

use crate::{Graph, IsClose, cartesian::Point};

/// An abstract pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Down(Point),
    Move(Point),
    Up(Point),
    Cancel,
}

/// The effect of an [`Input`] on the [`FenceTool`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The input means nothing in the current state.
    Ignored,
    /// A fence is being drawn between the given points.
    Preview { from: Point, to: Point },
    /// A fence between the given points is ready to be added.
    Committed { from: Point, to: Point },
    /// The fence being drawn has been discarded.
    Cancelled,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
enum State {
    #[default]
    Idle,
    Drawing {
        from: Point,
    },
}

/// Turns pointer events into candidate fences, snapping their endpoints to nearby connection
/// points.
///
/// The tool never mutates the graph: committed fences must be added by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FenceTool {
    state: State,
    zoom: f64,
}

impl Default for FenceTool {
    fn default() -> Self {
        Self {
            state: State::default(),
            zoom: 1.,
        }
    }
}

impl FenceTool {
    /// Sets the zoom level of the canvas, which scales down the snapping radius.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, State::Drawing { .. })
    }

    /// Returns the radius, in plan pixels, within which endpoints snap to connection points.
    pub fn snap_radius(&self, graph: &Graph) -> f64 {
        graph.config().snap_distance / self.zoom
    }

    pub fn handle(&mut self, input: Input, graph: &Graph) -> Outcome {
        match (self.state, input) {
            (State::Idle, Input::Down(point)) => {
                let from = self.snap(&point, graph);
                self.state = State::Drawing { from };
                Outcome::Preview { from, to: from }
            }
            (State::Drawing { from }, Input::Move(point)) => Outcome::Preview {
                from,
                to: self.snap(&point, graph),
            },
            (State::Drawing { from }, Input::Up(point)) => {
                self.state = State::Idle;

                let to = self.snap(&point, graph);
                if from.is_close(&to, &graph.config().tolerance()) {
                    return Outcome::Cancelled;
                }

                Outcome::Committed { from, to }
            }
            (State::Drawing { .. }, Input::Cancel) => {
                self.state = State::Idle;
                Outcome::Cancelled
            }
            _ => Outcome::Ignored,
        }
    }

    fn snap(&self, point: &Point, graph: &Graph) -> Point {
        graph
            .nearest_connection_point(point, self.snap_radius(graph))
            .map(|(_, position)| position)
            .unwrap_or(*point)
    }
}
