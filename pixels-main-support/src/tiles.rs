use life_grid::{GridSize, World};

pub const BACKGROUND_COLOR: [u8; 4] = [0x00, 0x00, 0x00, 0xff];
pub const GRIDLINE_COLOR: [u8; 4] = [0x14, 0x14, 0x14, 0xff];
pub const ALIVE_COLOR: [u8; 4] = [0x00, 0xff, 0xff, 0xff];

/// Screen geometry of the board.
///
/// Each cell owns a square of `pitch()` pixels: a one pixel gridline along its top and left
/// edges, then `tile_margin` pixels of background around a `tile_size` tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileLayout {
    pub tile_size: u32,
    pub tile_margin: u32,
}

impl Default for TileLayout {
    fn default() -> Self {
        Self {
            tile_size: 13,
            tile_margin: 1,
        }
    }
}

impl TileLayout {
    pub fn new(tile_size: u32, tile_margin: u32) -> Self {
        assert!(tile_size > 0);
        Self {
            tile_size,
            tile_margin,
        }
    }

    pub fn pitch(&self) -> u32 {
        self.tile_size + 2 * self.tile_margin + 1
    }

    /// Frame buffer dimensions in pixels for a grid of `size`.
    pub fn frame_size(&self, size: GridSize) -> (u32, u32) {
        (size.width * self.pitch(), size.height * self.pitch())
    }

    /// The cell under a frame pixel. Pixels left of or above the frame give negative cells and
    /// pixels past its far edges give cells past the grid; the grid ignores both.
    pub fn cell_at(&self, px: i64, py: i64) -> (i64, i64) {
        let pitch = self.pitch() as i64;
        (px.div_euclid(pitch), py.div_euclid(pitch))
    }

    /// Paints the current generation of `world` into an RGBA frame sized by
    /// [`TileLayout::frame_size`].
    pub fn draw<W: World>(&self, world: &W, frame: &mut [u8]) {
        let (width, height) = self.frame_size(world.size());
        debug_assert_eq!(frame.len(), 4 * width as usize * height as usize);

        let pitch = self.pitch();
        for (index, pixel) in frame.chunks_exact_mut(4).enumerate() {
            let x = index as u32 % width;
            let y = index as u32 / width;
            let color = if x % pitch == 0 || y % pitch == 0 {
                GRIDLINE_COLOR
            } else {
                BACKGROUND_COLOR
            };
            pixel.copy_from_slice(&color);
        }

        let inset = 1 + self.tile_margin;
        world.for_each_alive(|loc| {
            let left = loc.x * pitch + inset;
            let top = loc.y * pitch + inset;
            for y in top..top + self.tile_size {
                let row = y as usize * width as usize;
                for x in left..left + self.tile_size {
                    let offset = 4 * (row + x as usize);
                    frame[offset..offset + 4].copy_from_slice(&ALIVE_COLOR);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_grid::{SimConfig, Simulation};
    use std::time::Duration;

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let offset = 4 * (y as usize * width as usize + x as usize);
        frame[offset..offset + 4].try_into().unwrap()
    }

    #[test]
    fn default_pitch_matches_classic_tiles() {
        let layout = TileLayout::default();
        assert_eq!(layout.pitch(), 16);
        assert_eq!(layout.frame_size(GridSize::new(50, 50)), (800, 800));
    }

    #[test]
    fn cell_at_floors_to_tiles() {
        let layout = TileLayout::default();
        assert_eq!(layout.cell_at(0, 0), (0, 0));
        assert_eq!(layout.cell_at(15, 15), (0, 0));
        assert_eq!(layout.cell_at(16, 31), (1, 1));
        assert_eq!(layout.cell_at(799, 0), (49, 0));
        assert_eq!(layout.cell_at(800, 0), (50, 0));
        assert_eq!(layout.cell_at(-1, -16), (-1, -1));
        assert_eq!(layout.cell_at(-17, 5), (-2, 0));
    }

    #[test]
    fn draw_paints_tiles_and_gridlines() {
        let layout = TileLayout::default();
        let config = SimConfig::new(3, 2, Duration::from_millis(100)).unwrap();
        let mut sim = Simulation::new(config);
        sim.paint(1, 1, true);

        let (width, height) = layout.frame_size(sim.grid().size());
        let mut frame = vec![0; 4 * width as usize * height as usize];
        layout.draw(&sim, &mut frame);

        assert_eq!(pixel(&frame, width, 0, 0), GRIDLINE_COLOR);
        assert_eq!(pixel(&frame, width, 16, 5), GRIDLINE_COLOR);
        assert_eq!(pixel(&frame, width, 5, 16), GRIDLINE_COLOR);

        // Margin, first and last tile pixel, margin.
        assert_eq!(pixel(&frame, width, 17, 24), BACKGROUND_COLOR);
        assert_eq!(pixel(&frame, width, 18, 24), ALIVE_COLOR);
        assert_eq!(pixel(&frame, width, 30, 30), ALIVE_COLOR);
        assert_eq!(pixel(&frame, width, 31, 24), BACKGROUND_COLOR);

        // A dead cell keeps its background.
        assert_eq!(pixel(&frame, width, 40, 8), BACKGROUND_COLOR);
    }

    #[test]
    fn redraw_after_step_clears_old_tiles() {
        let layout = TileLayout::default();
        let config = SimConfig::new(4, 4, Duration::from_millis(100)).unwrap();
        let mut sim = Simulation::new(config);
        sim.paint(2, 2, true);

        let (width, height) = layout.frame_size(sim.grid().size());
        let mut frame = vec![0; 4 * width as usize * height as usize];
        layout.draw(&sim, &mut frame);
        assert_eq!(pixel(&frame, width, 40, 40), ALIVE_COLOR);

        sim.toggle_run();
        assert!(sim.advance(Duration::from_secs(1)));
        layout.draw(&sim, &mut frame);
        assert_eq!(pixel(&frame, width, 40, 40), BACKGROUND_COLOR);
    }
}
