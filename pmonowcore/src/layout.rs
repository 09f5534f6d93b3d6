//! Panel layout resolution.
//!
//! The host renderer is a pure pixel pusher: it receives a [`FrameLayout`]
//! with every coordinate, string, and color already resolved, and holds no
//! poll or smoothing state of its own. The size thresholds in here are ad
//! hoc heuristics tied to a small HUD panel, so they live in a
//! [`LayoutPolicy`] the host can override rather than in the core rules.

use pmonowutils::format_timestamp;

use crate::model::Snapshot;
use crate::settings::{OverlaySettings, Side};
use crate::smoothing::SmoothedValues;

const TITLE_COLOR: u32 = 0xFFFF_FFFF;
const SECONDARY_COLOR: u32 = 0xFFAA_AAAA;
const BAR_BACKGROUND_COLOR: u32 = 0xFF22_2222;
const BAR_FILL_COLOR: u32 = 0xFFD3_D3D3;

const PAUSE_SYMBOL: &str = "❚❚";
const PLAY_SYMBOL: &str = "▶";

/// Tunable layout heuristics of the panel.
#[derive(Debug, Clone)]
pub struct LayoutPolicy {
    pub text_padding: i32,
    pub base_cover_size: i32,
    pub max_cover_size: i32,
    pub bar_height: i32,
    pub bar_padding: i32,
    pub image_text_spacing: i32,
    pub timeline_gap: i32,
    pub min_timeline_width: i32,
    pub min_panel_width: i32,
    pub icon_gap: i32,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        LayoutPolicy {
            text_padding: 6,
            base_cover_size: 32,
            max_cover_size: 64,
            bar_height: 2,
            bar_padding: 2,
            image_text_spacing: 10,
            timeline_gap: 4,
            min_timeline_width: 80,
            min_panel_width: 100,
            icon_gap: 6,
        }
    }
}

/// Text metrics supplied by the host's font renderer.
pub trait TextMeasurer {
    /// Pixel width of `text` in the host font.
    fn text_width(&self, text: &str) -> i32;
    /// Pixel height of one text line.
    fn line_height(&self) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// One string to draw, fully positioned.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color_argb: u32,
}

/// Cover art placement: destination rect plus the centered square crop of
/// the source texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverPlacement {
    pub dest: Rect,
    pub src_x: i32,
    pub src_y: i32,
    pub src_size: i32,
    pub tex_w: u32,
    pub tex_h: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub icon: Option<TextLine>,
    pub bar: Rect,
    /// Width of the filled (elapsed) part of the bar.
    pub fill_width: i32,
    pub position_label: TextLine,
    pub end_label: TextLine,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub panel: Rect,
    /// Panel background color; `None` when every element is toggled off.
    pub background_argb: Option<u32>,
    pub cover: Option<CoverPlacement>,
    pub title: Option<TextLine>,
    pub artist: Option<TextLine>,
    pub timeline: Option<TimelineLayout>,
}

/// Resolve the full frame layout, or `None` when no media is active (the
/// overlay disappears entirely rather than showing stale values).
pub fn compute_frame(
    snapshot: &Snapshot,
    smoothed: &SmoothedValues,
    settings: &OverlaySettings,
    policy: &LayoutPolicy,
    measurer: &dyn TextMeasurer,
    screen_width: i32,
    screen_height: i32,
) -> Option<FrameLayout> {
    if !snapshot.is_media_active {
        return None;
    }

    let line_height = measurer.line_height();
    let show_cover = snapshot.image_loaded && settings.show_cover_art;

    // Hauteur du bloc texte et du contenu complet.
    let mut text_block_height = 0;
    if settings.show_media_title {
        text_block_height += line_height;
    }
    if settings.show_artist_name {
        text_block_height += line_height;
    }

    let mut content_height = text_block_height;
    if settings.show_timeline {
        if text_block_height > 0 {
            content_height += policy.timeline_gap;
        }
        content_height += policy.bar_height + policy.bar_padding + line_height;
    }

    // La pochette est forcée à la hauteur du contenu, bornée au maximum.
    let mut cover_size = if show_cover {
        policy.base_cover_size.max(content_height)
    } else {
        0
    };
    cover_size = cover_size.min(policy.max_cover_size);

    let unified_content_height = content_height.max(cover_size);
    let panel_height = unified_content_height + policy.text_padding * 2;

    let title_width = measurer.text_width(&snapshot.title);
    let artist_width = measurer.text_width(&snapshot.artist);

    let mut text_block_width = 0;
    if settings.show_media_title {
        text_block_width = text_block_width.max(title_width);
    }
    if settings.show_artist_name {
        text_block_width = text_block_width.max(artist_width);
    }
    if settings.show_timeline && text_block_width < policy.min_timeline_width {
        text_block_width = policy.min_timeline_width;
    }

    let mut panel_width = 0;
    if text_block_width > 0 {
        panel_width = text_block_width;
    }
    if show_cover {
        panel_width += cover_size;
        if text_block_width > 0 {
            panel_width += policy.image_text_spacing;
        }
    }
    panel_width += policy.text_padding * 2;

    if panel_width < policy.min_panel_width && !(show_cover && text_block_width == 0) {
        panel_width = policy.min_panel_width;
    } else if text_block_width == 0 && show_cover {
        panel_width = cover_size + policy.text_padding * 2;
    }

    let panel_x = match settings.side {
        Side::Left => 0,
        Side::Right => screen_width - panel_width,
    };
    let panel_y =
        ((screen_height - panel_height) as f64 * (settings.y_position as f64 / 100.0)) as i32;
    let content_start_y = panel_y + (panel_height - unified_content_height) / 2;

    let background_argb = settings.any_element_visible().then(|| {
        let alpha = (settings.background_opacity as f64 * 2.55) as u32;
        alpha << 24
    });

    let image_start_x = panel_x + policy.text_padding;
    let mut text_start_x = panel_x + policy.text_padding;
    if show_cover {
        text_start_x += cover_size + policy.image_text_spacing;
    }

    // Pochette recadrée au carré centré.
    let cover = (show_cover && snapshot.cover_tex_w > 0 && snapshot.cover_tex_h > 0).then(|| {
        let src_size = snapshot.cover_tex_w.min(snapshot.cover_tex_h) as i32;
        CoverPlacement {
            dest: Rect {
                x: image_start_x,
                y: content_start_y,
                width: cover_size,
                height: cover_size,
            },
            src_x: (snapshot.cover_tex_w as i32 - src_size) / 2,
            src_y: (snapshot.cover_tex_h as i32 - src_size) / 2,
            src_size,
            tex_w: snapshot.cover_tex_w,
            tex_h: snapshot.cover_tex_h,
        }
    });

    let mut current_y = content_start_y;

    let title = settings.show_media_title.then(|| {
        let line = TextLine {
            text: snapshot.title.clone(),
            x: text_start_x,
            y: current_y,
            color_argb: TITLE_COLOR,
        };
        current_y += line_height;
        line
    });

    let artist = settings.show_artist_name.then(|| {
        let line = TextLine {
            text: snapshot.artist.clone(),
            x: text_start_x,
            y: current_y,
            color_argb: SECONDARY_COLOR,
        };
        current_y += line_height;
        line
    });

    let timeline = (settings.show_timeline && snapshot.target_end_sec > 0.0).then(|| {
        if settings.show_media_title || settings.show_artist_name {
            current_y += policy.timeline_gap;
        }

        let bar_y = current_y;
        let mut bar_x = text_start_x;

        let icon = settings.show_play_status_icon.then(|| {
            let symbol = if snapshot.is_playing {
                PAUSE_SYMBOL
            } else {
                PLAY_SYMBOL
            };
            let icon_width = measurer.text_width(symbol);
            let icon_y = bar_y - line_height / 2 + policy.bar_height / 2;
            bar_x += icon_width + policy.icon_gap;
            TextLine {
                text: symbol.to_string(),
                x: text_start_x,
                y: icon_y,
                color_argb: TITLE_COLOR,
            }
        });

        let bar_width = (panel_x + panel_width - policy.text_padding) - bar_x;
        let bar = Rect {
            x: bar_x,
            y: bar_y,
            width: bar_width,
            height: policy.bar_height,
        };
        let fill_width = (bar_width as f64 * smoothed.progress) as i32;

        current_y += policy.bar_height + policy.bar_padding;

        let position_text = format_timestamp(smoothed.position_sec);
        let end_text = format_timestamp(smoothed.end_sec);
        let end_width = measurer.text_width(&end_text);

        TimelineLayout {
            icon,
            bar,
            fill_width,
            position_label: TextLine {
                text: position_text,
                x: bar_x,
                y: current_y,
                color_argb: SECONDARY_COLOR,
            },
            end_label: TextLine {
                text: end_text,
                x: bar_x + bar_width - end_width,
                y: current_y,
                color_argb: SECONDARY_COLOR,
            },
        }
    });

    Some(FrameLayout {
        panel: Rect {
            x: panel_x,
            y: panel_y,
            width: panel_width,
            height: panel_height,
        },
        background_argb,
        cover,
        title,
        artist,
        timeline,
    })
}
