use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawError, DrawList};

/// A shape vertex: position in window pixels plus its own color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub position: Vec2,
    pub color: Color,
}

impl Vertex {
    #[inline]
    pub fn new(position: impl Into<Vec2>, color: Color) -> Self {
        Self { position: position.into(), color }
    }
}

/// User-built polygon or polyline.
///
/// Rendering rules:
/// - `connected && filled`: convex polygon fan
/// - `connected`: closed outline (last vertex joins the first)
/// - otherwise: open polyline through the vertices in order
///
/// New shapes start connected and unfilled.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    vertices: Vec<Vertex>,
    connected: bool,
    filled: bool,
}

impl Default for Shape {
    fn default() -> Self {
        Self { vertices: Vec::new(), connected: true, filled: false }
    }
}

impl Shape {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn add_vertices(&mut self, vertices: impl IntoIterator<Item = Vertex>) {
        self.vertices.extend(vertices);
    }

    /// Replaces the vertex at `index`.
    pub fn update_vertex(&mut self, index: usize, vertex: Vertex) -> Result<(), DrawError> {
        let len = self.vertices.len();
        let slot = self
            .vertices
            .get_mut(index)
            .ok_or(DrawError::VertexOutOfRange { index, len })?;
        *slot = vertex;
        Ok(())
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    #[inline]
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Snapshot of a [`Shape`] at record time.
///
/// Mutating the shape after drawing it does not alter the recorded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCmd {
    pub vertices: Vec<Vertex>,
    pub connected: bool,
    pub filled: bool,
}

impl From<&Shape> for ShapeCmd {
    fn from(shape: &Shape) -> Self {
        Self {
            vertices: shape.vertices.clone(),
            connected: shape.connected,
            filled: shape.filled,
        }
    }
}

impl DrawList {
    #[inline]
    pub fn push_shape(&mut self, shape: &Shape) {
        self.push(DrawCmd::Shape(ShapeCmd::from(shape)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vertex {
        Vertex::new(Vec2::new(x, y), Color::WHITE)
    }

    #[test]
    fn new_shape_is_connected_outline() {
        let shape = Shape::new();
        assert!(shape.is_connected());
        assert!(!shape.is_filled());
        assert!(shape.vertices().is_empty());
    }

    #[test]
    fn update_vertex_replaces_in_place() {
        let mut shape = Shape::new();
        shape.add_vertices([v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0)]);
        shape.update_vertex(1, v(20.0, 0.0)).unwrap();
        assert_eq!(shape.vertices()[1].position, Vec2::new(20.0, 0.0));
        assert_eq!(shape.vertices().len(), 3);
    }

    #[test]
    fn update_vertex_out_of_range_is_an_error() {
        let mut shape = Shape::new();
        shape.add_vertex(v(0.0, 0.0));
        let err = shape.update_vertex(3, v(1.0, 1.0)).unwrap_err();
        assert_eq!(err, DrawError::VertexOutOfRange { index: 3, len: 1 });
        assert_eq!(shape.vertices()[0].position, Vec2::zero());
    }

    #[test]
    fn recorded_shape_is_a_snapshot() {
        let mut shape = Shape::new();
        shape.add_vertices([v(0.0, 0.0), v(5.0, 5.0)]);
        let mut list = DrawList::new();
        list.push_shape(&shape);
        shape.update_vertex(0, v(9.0, 9.0)).unwrap();

        let DrawCmd::Shape(cmd) = &list.items()[0].cmd else {
            panic!("expected a shape command");
        };
        assert_eq!(cmd.vertices[0].position, Vec2::zero());
    }
}
