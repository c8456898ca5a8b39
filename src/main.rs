use std::env;
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;
use memmap::Mmap;
use ntview::{Rom, ViewerConfig, ViewerSlot, Vram};

const USAGE: &str = "usage: ntview ROM [--config FILE] [--nametables FILE] [--palette FILE] \
                     [--ctrl BYTE] [--scroll X,Y] [--scanline LINE] [--out FILE] [--attributes] [--hide-palette] \
                     [--scroll-lines] [--window]";

struct Args {
    rom: PathBuf,
    config: PathBuf,
    nametables: Option<PathBuf>,
    palette: Option<PathBuf>,
    ctrl: u8,
    scroll: Option<(u8, u8)>,
    scanline: u16,
    out: PathBuf,
    attributes: bool,
    hide_palette: bool,
    scroll_lines: bool,
    window: bool,
}

fn parse_byte(text: &str) -> Result<u8> {
    let text = text.trim();
    let byte = match text.strip_prefix("0x").or_else(|| text.strip_prefix('$')) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => text.parse(),
    };
    byte.with_context(|| format!("invalid byte {:?}", text))
}

impl Args {
    fn parse(mut args: impl Iterator<Item = OsString>) -> Result<Self> {
        let mut parsed = Args {
            rom: PathBuf::new(),
            config: PathBuf::from("ntview.toml"),
            nametables: None,
            palette: None,
            ctrl: 0,
            scroll: None,
            scanline: 0,
            out: PathBuf::from("nametables.png"),
            attributes: false,
            hide_palette: false,
            scroll_lines: false,
            window: false,
        };
        let mut rom = None;

        while let Some(arg) = args.next() {
            let mut value = || args.next().with_context(|| format!("{:?} needs a value\n{}", arg, USAGE));
            match arg.to_str() {
                Some("--config") => parsed.config = value()?.into(),
                Some("--nametables") => parsed.nametables = Some(value()?.into()),
                Some("--palette") => parsed.palette = Some(value()?.into()),
                Some("--out") => parsed.out = value()?.into(),
                Some("--ctrl") => parsed.ctrl = parse_byte(&value()?.to_string_lossy())?,
                Some("--scroll") => {
                    let text = value()?.to_string_lossy().into_owned();
                    let (x, y) = text.split_once(',').with_context(|| format!("invalid scroll {:?}", text))?;
                    parsed.scroll = Some((parse_byte(x)?, parse_byte(y)?));
                }
                Some("--scanline") => {
                    let text = value()?.to_string_lossy().into_owned();
                    parsed.scanline = text.trim().parse().with_context(|| format!("invalid scanline {:?}", text))?;
                }
                Some("--attributes") => parsed.attributes = true,
                Some("--hide-palette") => parsed.hide_palette = true,
                Some("--scroll-lines") => parsed.scroll_lines = true,
                Some("--window") => parsed.window = true,
                Some("-h") | Some("--help") => bail!(USAGE),
                _ if rom.is_none() => rom = Some(PathBuf::from(&arg)),
                _ => bail!("unexpected argument {:?}\n{}", arg, USAGE),
            }
        }

        parsed.rom = rom.with_context(|| USAGE)?;
        Ok(parsed)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse(env::args_os().skip(1))?;

    let mut config = ViewerConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    config.attribute_view |= args.attributes;
    config.hide_palette |= args.hide_palette;
    config.show_scroll_lines |= args.scroll_lines;

    let file = File::open(&args.rom).with_context(|| format!("opening {}", args.rom.display()))?;
    let rom = unsafe { Mmap::map(&file)? };
    let rom = Rom::parse(&rom[..]).with_context(|| format!("parsing {}", args.rom.display()))?;
    info!("{:?}", rom.header);

    let mut vram = Vram::from_rom(&rom);
    if let Some(path) = &args.nametables {
        let dump = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        vram.load_nametables(&dump)?;
    }
    if let Some(path) = &args.palette {
        let dump = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        vram.load_palette(&dump)?;
    }
    vram.registers.set_control(args.ctrl);
    vram.set_scanline(args.scanline);
    if let Some((x, y)) = args.scroll {
        vram.registers.write_scroll(x);
        vram.registers.write_scroll(y);
    }

    let mut slot = ViewerSlot::default();
    let viewer = slot.open(config)?;
    viewer.on_mirroring_change(|old, new| info!("mirroring: {:?} -> {:?}", old, new));

    if args.window {
        #[cfg(feature = "minifb")]
        {
            let mut window = ntview::viewer::backend::ViewerWindow::open()?;
            window.run(viewer, &vram)?;
            slot.close();
            return Ok(());
        }
        #[cfg(not(feature = "minifb"))]
        bail!("built without the minifb feature, --window is unavailable");
    }

    viewer.update(&vram, None, true);
    viewer
        .compose()
        .save(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    info!("wrote {}", args.out.display());
    slot.close();
    Ok(())
}
