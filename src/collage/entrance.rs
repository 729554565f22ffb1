use crate::util::{ease_back_out, ease_cubic_in_out};

use super::config::EntranceConfig;

/// Cosmetic scale factors for one node. Physics never reads these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub opacity: f32,
    pub radius_scale: f32,
    pub image_scale: f32,
    pub clip_scale: f32,
}

impl Reveal {
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        radius_scale: 0.0,
        image_scale: 0.0,
        clip_scale: 0.0,
    };

    pub const FULL: Self = Self {
        opacity: 1.0,
        radius_scale: 1.0,
        image_scale: 1.0,
        clip_scale: 1.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TitleReveal {
    pub title_font_size: f32,
    pub subtitle_font_size: f32,
}

/// Staggered reveal started when a node set is built: node `i` starts after `i * delay`.
pub(super) struct Entrance {
    config: EntranceConfig,
    started_at: f64,
    node_count: usize,
}

impl Entrance {
    pub(super) fn new(config: EntranceConfig, started_at: f64, node_count: usize) -> Self {
        Self {
            config,
            started_at,
            node_count,
        }
    }

    fn local_time(&self, index: usize, now: f64) -> f32 {
        let delay = index as f64 * f64::from(self.config.per_node_delay_secs);
        (now - self.started_at - delay) as f32
    }

    fn ratio(elapsed: f32, duration: f32) -> f32 {
        if duration <= 0.0 {
            return if elapsed >= 0.0 { 1.0 } else { 0.0 };
        }
        (elapsed / duration).clamp(0.0, 1.0)
    }

    pub(super) fn reveal(&self, index: usize, now: f64) -> Reveal {
        if index >= self.node_count {
            return Reveal::HIDDEN;
        }

        let elapsed = self.local_time(index, now);
        if elapsed <= 0.0 {
            return Reveal::HIDDEN;
        }
        if elapsed >= self.config.fade_secs.max(self.config.grow_secs) {
            return Reveal::FULL;
        }

        let fade = Self::ratio(elapsed, self.config.fade_secs);
        let grow = Self::ratio(elapsed, self.config.grow_secs);
        Reveal {
            opacity: fade,
            radius_scale: ease_back_out(grow),
            image_scale: ease_cubic_in_out(grow),
            clip_scale: ease_cubic_in_out(grow),
        }
    }

    /// Font sizes for the title node's two labels; the subtitle starts a little later.
    pub(super) fn title_reveal(&self, index: usize, now: f64) -> TitleReveal {
        let elapsed = self.local_time(index, now);
        let title = ease_cubic_in_out(Self::ratio(elapsed, self.config.grow_secs));
        let subtitle = ease_cubic_in_out(Self::ratio(
            elapsed - self.config.subtitle_offset_secs,
            self.config.grow_secs,
        ));

        TitleReveal {
            title_font_size: self.config.title_font_size * title,
            subtitle_font_size: self.config.subtitle_font_size * subtitle,
        }
    }

    pub(super) fn is_complete(&self, now: f64) -> bool {
        let Some(last) = self.node_count.checked_sub(1) else {
            return true;
        };
        let tail = self
            .config
            .grow_secs
            .max(self.config.fade_secs)
            .max(self.config.subtitle_offset_secs + self.config.grow_secs);
        self.local_time(last, now) >= tail
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::collage::config::CollageConfig;

    fn entrance(count: usize) -> (Entrance, EntranceConfig) {
        let config = CollageConfig::default().entrance;
        (Entrance::new(config, 10.0, count), config)
    }

    #[test]
    fn nodes_reveal_in_creation_order() {
        let (entrance, config) = entrance(5);
        let now = 10.0 + f64::from(config.per_node_delay_secs) * 2.5;

        assert!(entrance.reveal(0, now).opacity > entrance.reveal(1, now).opacity);
        assert!(entrance.reveal(2, now).opacity > 0.0);
        assert_eq!(entrance.reveal(3, now), Reveal::HIDDEN);
        assert_eq!(entrance.reveal(0, 9.0), Reveal::HIDDEN);
    }

    #[test]
    fn reveal_ends_fully_visible() {
        let (entrance, config) = entrance(5);
        assert!(!entrance.is_complete(10.0));
        assert!(entrance.is_complete(20.0));
        assert_eq!(entrance.reveal(4, 20.0), Reveal::FULL);
        assert_eq!(entrance.reveal(7, 20.0), Reveal::HIDDEN);

        let title = entrance.title_reveal(0, 20.0);
        assert_eq!(title.title_font_size, config.title_font_size);
        assert_eq!(title.subtitle_font_size, config.subtitle_font_size);
    }

    #[test]
    fn subtitle_trails_title() {
        let (entrance, config) = entrance(1);
        let labels = entrance.title_reveal(0, 10.0 + f64::from(config.subtitle_offset_secs));
        assert!(labels.title_font_size > 0.0);
        assert_eq!(labels.subtitle_font_size, 0.0);
    }

    #[test]
    fn empty_set_is_complete_immediately() {
        let (entrance, _) = entrance(0);
        assert!(entrance.is_complete(10.0));
    }
}
