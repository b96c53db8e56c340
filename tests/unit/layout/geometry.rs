use super::*;

fn close(a: Point, b: Point) -> bool {
    a.distance(b) < 1e-9
}

#[test]
fn segment_is_pulled_in_by_radius() {
    let seg = edge_segment(Point::new(0.0, 0.0), Point::new(2.0, 0.0), 0.2, 0.2).unwrap();
    assert!(close(seg.start, Point::new(0.2, 0.0)));
    assert!(close(seg.end, Point::new(1.8, 0.0)));
    assert!((seg.length() - 1.6).abs() < 1e-12);
}

#[test]
fn segment_follows_diagonal_direction() {
    let seg = edge_segment(Point::new(1.0, 1.0), Point::new(4.0, 5.0), 0.5, 1.0).unwrap();
    assert!(close(seg.start, Point::new(1.3, 1.4)));
    assert!(close(seg.end, Point::new(3.4, 4.2)));
}

#[test]
fn coincident_endpoints_are_degenerate() {
    let p = Point::new(0.5, -1.0);
    let err = edge_segment(p, p, 0.2, 0.2).unwrap_err();
    assert!(matches!(err, CliquenetError::DegenerateGeometry(_)));
}

#[test]
fn grid_row_and_column_share_the_anchor() {
    let grid = GridGeometry::new(4, 0.1, 3.0, 1.0);
    assert!((grid.cell - 0.2).abs() < 1e-12);
    assert!((grid.x0 - (-0.3)).abs() < 1e-12);
    assert!(close(grid.row_position(0), Point::new(-0.1, 3.0)));
    assert!(close(grid.column_position(0), Point::new(-0.3, 2.8)));
    assert!(close(grid.row_position(3), Point::new(0.5, 3.0)));
}

#[test]
fn cells_line_up_with_row_and_column_nodes() {
    let grid = GridGeometry::new(5, 0.1, 3.0, 1.0);
    for i in 0..5 {
        for j in 0..5 {
            let c = grid.cell_center(i, j);
            assert!((c.x - grid.row_position(i).x).abs() < 1e-9);
            assert!((c.y - grid.column_position(j).y).abs() < 1e-9);
        }
    }
}

#[test]
fn cells_ignore_the_line_outset() {
    for buff in [0.0, 0.5, 2.0] {
        let grid = GridGeometry::new(4, 0.1, 3.0, buff);
        for i in 0..4 {
            for j in 0..4 {
                let c = grid.cell_center(i, j);
                assert!((c.x - grid.row_position(i).x).abs() < 1e-9, "buff {buff}");
                assert!((c.y - grid.column_position(j).y).abs() < 1e-9, "buff {buff}");
            }
        }
    }
    let tight = GridGeometry::new(4, 0.1, 3.0, 0.0);
    assert!((tight.left - tight.x0).abs() < 1e-12);
    assert!((tight.top - tight.y0).abs() < 1e-12);
}

#[test]
fn grid_lines_frame_every_cell() {
    let grid = GridGeometry::new(3, 0.1, 0.0, 1.0);
    let lines = grid.lines();
    assert_eq!(lines.len(), 8);
    let (vertical, horizontal) = lines.split_at(4);
    assert!(vertical.iter().all(|s| s.start.x == s.end.x));
    assert!(horizontal.iter().all(|s| s.start.y == s.end.y));
    assert!((vertical[0].start.x - grid.left).abs() < 1e-12);
    assert!((vertical[3].start.x - grid.right).abs() < 1e-9);
    assert!((horizontal[3].start.y - grid.bottom).abs() < 1e-9);
}
