// What you SEE:
// • The element (an image file, or one webcam frame) sits in the window.
// • Space or left click "deletes" it: it crumbles left to right into drifting dust.
// • ESC quits.
//
// Usage: disintegrate [IMAGE_PATH|camera] [low|average|high]

use disintegrate::camera::CameraSnapshot;
use disintegrate::draw::Drawer;
use disintegrate::snapshot::{ImageSnapshot, StaticSnapshot};
use disintegrate::types::FrameBuffer;
use disintegrate::{Canvas, EffectController, Error, Rasterizer, SnapshotProvider, Tier};
use std::time::{Duration, Instant};

const BACKGROUND: u32 = 0x00_20_22_28; // visual: dark slate behind everything
const MARGIN_SIDE: i32 = 120;         // room for ±100 px sideways jitter
const MARGIN_TOP: i32 = 200;          // dust floats up, so more room above
const MARGIN_BOTTOM: i32 = 120;

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let source = args.next();
    let tier = args.next().map(|name| Tier::from_name(&name)).unwrap_or(Tier::Low);

    let origin = (MARGIN_SIDE, MARGIN_TOP);
    let mut host: Box<dyn SnapshotProvider> = match source.as_deref() {
        None | Some("camera") => Box::new(CameraSnapshot::new(0, 320, 240, origin)),
        Some(path) => Box::new(ImageSnapshot::new(path, origin)),
    };

    /* --- Preview capture sizes the window ---
       Visual: the element shows up, untouched, until you trigger the effect. */
    let preview = host.capture()?;
    // The effect dissolves exactly what was on screen, without capturing twice.
    let mut frozen = StaticSnapshot::from_snapshot(&preview);
    let width = preview.buffer.width() + 2 * MARGIN_SIDE as usize;
    let height = preview.buffer.height() + (MARGIN_TOP + MARGIN_BOTTOM) as usize;
    let mut drawer = Drawer::new("Disintegrate: Space to delete", width, height)?;
    let mut screen = FrameBuffer::new(width, height, BACKGROUND);

    let mut effect: Option<EffectController> = None;
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        screen.clear(BACKGROUND);
        let mut trigger = false;

        match effect.as_mut() {
            None => {
                Canvas::new(&mut screen).paint_buffer(&preview.buffer, origin.0, origin.1, 255);
                trigger = drawer.trigger_pressed_once();
            }
            Some(fx) => {
                let running = fx.advance(now); // tick first, then draw this frame
                fx.draw(&mut Canvas::new(&mut screen));
                if !running {
                    log::info!("dissolve complete");
                    drawer.present(&screen)?;
                    break;
                }
            }
        }

        if trigger {
            match EffectController::start(&mut frozen, tier) {
                Ok(started) => {
                    host.hide();
                    effect = Some(started);
                }
                // The element just stays put; nothing else to do.
                Err(e) => log::warn!("dissolve did not start: {e}"),
            }
        }

        drawer.present(&screen)?;

        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            log::debug!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    // Window gone: release the ticker.
    if let Some(fx) = effect.as_mut() {
        fx.detach();
    }

    Ok(())
}
