use std::time::Duration;

use log::debug;
use minifb::{Key, Result, Scale, ScaleMode, Window, WindowOptions};

use super::session::{NameTableViewer, TABLE_HEIGHT, TABLE_WIDTH};
use super::source::PpuSource;

const WIDTH: usize = TABLE_WIDTH as usize * 2;
const HEIGHT: usize = TABLE_HEIGHT as usize * 2;

pub struct ViewerWindow {
    pub win: Window,
    fb: Vec<u32>,
}

impl ViewerWindow {
    pub fn open() -> Result<Self> {
        let mut win = Window::new(
            "Name Table Viewer",
            WIDTH,
            HEIGHT,
            WindowOptions {
                resize: true,
                scale: Scale::FitScreen,
                scale_mode: ScaleMode::AspectRatioStretch,
                ..Default::default()
            },
        )?;
        // 30Hz, the rate the refresh slider is relative to
        win.limit_update_rate(Some(Duration::from_millis(33)));
        Ok(Self {
            win,
            fb: vec![0; WIDTH * HEIGHT],
        })
    }

    pub fn is_open(&self) -> bool { self.win.is_open() && !self.win.is_key_down(Key::Escape) }

    /// One timer tick: refresh the viewer and repaint if it drew anything.
    pub fn tick<S>(&mut self, viewer: &mut NameTableViewer, src: &S) -> Result<()>
    where
        S: PpuSource + ?Sized,
    {
        viewer.refresh(src);
        if viewer.take_repaint() {
            let image = viewer.compose();
            for (dst, px) in self.fb.iter_mut().zip(image.pixels()) {
                let [r, g, b, _] = px.0;
                *dst = u32::from_be_bytes([0, r, g, b]);
            }
        }
        self.win.update_with_buffer(&self.fb, WIDTH, HEIGHT)
    }

    /// Refreshes until the window is closed.
    pub fn run<S>(&mut self, viewer: &mut NameTableViewer, src: &S) -> Result<()>
    where
        S: PpuSource + ?Sized,
    {
        while self.is_open() {
            self.tick(viewer, src)?;
        }
        debug!("viewer window closed");
        Ok(())
    }
}
