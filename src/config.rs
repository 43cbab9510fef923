use clap::Parser;
use std::path::{Path, PathBuf};

/// Command line options shared by every demo.
#[derive(Clone, Debug, Parser)]
#[command(version, about = "OpenGL tutorial demo")]
pub struct DemoArgs {
    /// Initial window width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,
    /// Initial window height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,
    /// Directory holding the demo's shaders and textures
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,
    /// Texture to use instead of the demo's default (PNG, JPEG, or TGA)
    #[arg(long, value_name = "PATH")]
    pub texture: Option<PathBuf>,
    /// Don't wait for vertical sync when swapping buffers
    #[arg(long)]
    pub no_vsync: bool,
    /// Wait for a line on stdin before exiting
    #[arg(long)]
    pub pause_on_exit: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub pause_on_exit: bool,
    pub asset_dir: PathBuf,
    pub texture: Option<PathBuf>,
}

impl DemoConfig {
    pub fn from_args<P: Into<PathBuf>>(args: DemoArgs, title: &str, default_assets: P) -> Self {
        DemoConfig {
            title: title.to_owned(),
            width: args.width.max(1),
            height: args.height.max(1),
            vsync: !args.no_vsync,
            pause_on_exit: args.pause_on_exit,
            asset_dir: args.assets.unwrap_or_else(|| default_assets.into()),
            texture: args.texture,
        }
    }

    /// Path of an asset inside the demo's asset directory.
    pub fn asset<P: AsRef<Path>>(&self, name: P) -> PathBuf {
        self.asset_dir.join(name)
    }

    pub fn texture_or<P: AsRef<Path>>(&self, default_name: P) -> PathBuf {
        self.texture.clone().unwrap_or_else(|| self.asset(default_name))
    }
}
