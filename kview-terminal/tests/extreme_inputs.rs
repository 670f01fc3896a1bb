use kview_core::{BaseMesh, Command, MeshModel, RenderStyle, Viewer};
use kview_terminal::{TerminalDisplay, Viewport};
use proptest::prelude::*;
use std::io;

const WIDTH: u16 = 60;
const HEIGHT: u16 = 30;

fn viewer() -> Viewer<TerminalDisplay<io::Sink>> {
    let style = RenderStyle::default();
    let viewport = Viewport {
        left: 0,
        top: 0,
        width: WIDTH,
        height: HEIGHT,
    };
    let display = TerminalDisplay::new(io::sink(), style.axis_limits, viewport, false);
    let model = MeshModel::new(BaseMesh::letter_k().unwrap());
    Viewer::new(model, style, display).unwrap()
}

fn wide() -> impl Strategy<Value = f32> {
    prop_oneof![
        -1e30f32..1e30,
        -1e6f32..1e6,
        Just(0.0),
        Just(f32::MAX),
        Just(f32::MIN),
    ]
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (wide(), wide(), wide()).prop_map(|(x, y, z)| Command::shift(x, y, z)),
        (-1e10f32..1e10).prop_map(Command::Scale),
        Just(Command::Scale(0.0)),
        Just(Command::Scale(-1.0)),
        Just(Command::Reset),
    ]
}

proptest! {
    #[test]
    fn any_finite_command_still_presents_a_full_frame(
        commands in prop::collection::vec(command(), 1..16)
    ) {
        let mut viewer = viewer();
        for command in commands {
            viewer.apply(command).unwrap();
            prop_assert_eq!(viewer.scene().polygon_count(), 17);
            prop_assert_eq!(viewer.scene().marker_count(), 20);

            let lines = viewer.display().renderer().lines();
            prop_assert_eq!(lines.len(), HEIGHT as usize);
            prop_assert!(lines.iter().all(|l| l.chars().count() == WIDTH as usize));
        }
    }
}

#[test]
fn huge_shift_then_reset_restores_the_letter() {
    let mut viewer = viewer();
    let initial = viewer.display().renderer().lines();

    viewer.shift(0.0, 0.0, 1e20).unwrap();
    viewer.scale(1e10).unwrap();
    viewer.reset().unwrap();

    assert_eq!(viewer.display().renderer().lines(), initial);
}
