use clap::Args;
use pinchboard::geometry::Viewport;

pub mod demo;
pub mod layout;
pub mod replay;
pub mod validate;

#[derive(Args, Debug, Clone)]
pub struct ViewportArgs {
    #[arg(long, default_value_t = 1280, allow_negative_numbers = true)]
    pub width: i32,
    #[arg(long, default_value_t = 720, allow_negative_numbers = true)]
    pub height: i32,
}

impl ViewportArgs {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}
