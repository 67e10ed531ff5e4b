pub const PIXEL_BITS: usize = 4;

pub type Rgba = [u8; PIXEL_BITS];

pub struct RenderFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub buffer: &'a mut [u8],
}

impl<'a> RenderFrame<'a> {
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut Rgba> {
        self.buffer
            .chunks_exact_mut(PIXEL_BITS)
            .filter_map(|chunk| chunk.try_into().ok())
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let index = (x as usize + y as usize * self.width as usize) * PIXEL_BITS;

        self.buffer.get_mut(index..index + PIXEL_BITS)?.try_into().ok()
    }

    pub fn draw_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(pixel) = self.pixel_mut(x, y) {
            *pixel = color;
        }
    }

    pub fn draw_square(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        for y in y..y + height {
            for x in x..x + width {
                self.draw_pixel(x, y, color);
            }
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        for pixel in self.pixels_mut() {
            *pixel = color;
        }
    }
}
