use obj_viewer::math::hex_to_linear;
use obj_viewer::scene::{AxesHelper, GridHelper, Scene};

#[cfg(test)]
mod grid_helper_tests {
    use super::*;

    #[test]
    fn test_default_grid_line_count() {
        let grid = GridHelper::new(100.0, 30, 0xb7b7b7, 0xcbcbcb);
        // 31 lines per axis, two axes, two vertices per line
        assert_eq!(grid.vertices().len(), 31 * 2 * 2);
    }

    #[test]
    fn test_grid_spans_size_on_xz_plane() {
        let grid = GridHelper::new(100.0, 30, 0xb7b7b7, 0xcbcbcb);
        for v in grid.vertices() {
            assert_eq!(v.position[1], 0.0);
            assert!(v.position[0].abs() <= 50.0 + 1e-4);
            assert!(v.position[2].abs() <= 50.0 + 1e-4);
        }
    }

    #[test]
    fn test_center_lines_use_center_color() {
        let grid = GridHelper::new(10.0, 10, 0xff0000, 0x00ff00);
        let center = hex_to_linear(0xff0000);
        let vertices = grid.vertices();

        let center_count = vertices.iter().filter(|v| v.color == center).count();
        // x = 0 and z = 0, two vertices each
        assert_eq!(center_count, 4);
        for v in vertices.iter().filter(|v| v.color == center) {
            assert!(v.position[0].abs() < 1e-4 || v.position[2].abs() < 1e-4);
        }
    }

    #[test]
    fn test_odd_divisions_have_no_center_line() {
        let grid = GridHelper::new(100.0, 7, 0xff0000, 0x00ff00);
        let line = hex_to_linear(0x00ff00);
        assert!(grid.vertices().iter().all(|v| v.color == line));
    }

    #[test]
    fn test_scene_lines_include_grid_and_axes() {
        let mut scene = Scene::new(100.0, 30);
        scene.set_grid(GridHelper::new(100.0, 30, 0, 0));
        scene.set_axes(Some(AxesHelper::default()));
        assert_eq!(scene.line_vertices().len(), 124 + 6);

        scene.set_axes(None);
        assert_eq!(scene.line_vertices().len(), 124);
    }

    #[test]
    fn test_axes_sit_above_grid() {
        let axes = AxesHelper::default();
        for v in axes.vertices() {
            assert!(v.position[1] >= 0.03 - 1e-6);
        }
    }

    #[test]
    fn test_grid_change_bumps_revision() {
        let mut scene = Scene::new(100.0, 30);
        let before = scene.lines_revision();
        scene.set_grid(GridHelper::new(50.0, 10, 0, 0));
        assert!(scene.lines_revision() > before);
        assert_eq!(scene.grid().map(|g| g.size), Some(50.0));
    }
}
