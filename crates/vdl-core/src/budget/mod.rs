//! Bitrate budgeting for size-constrained re-encoding.
//!
//! Given a target size in bits and the media duration, reserve a fixed share
//! for container overhead, spread the rest evenly over time, and split the
//! resulting bitrate between audio and video. Pure arithmetic; no I/O.

/// Video bitrate floor in bits per second.
pub const MIN_VIDEO_BITRATE: u64 = 1_000;
/// Assumed audio bitrate when the probe cannot report one.
pub const DEFAULT_AUDIO_BITRATE: u64 = 192_000;
/// Audio bitrates tried, in order, after the source's own bitrate.
pub const AUDIO_FALLBACK_LADDER: [u64; 3] = [320_000, 256_000, 192_000];
/// Share of the target reserved for container framing.
pub const CONTAINER_OVERHEAD_PERCENT: u64 = 5;
/// Rate-control buffer is this fraction of the target size.
pub const BUFFER_DIVISOR: u64 = 20;

/// Computed audio/video split for one file. Invariant:
/// `selected_video_bitrate >= MIN_VIDEO_BITRATE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitrateBudget {
    pub target_total_bits: u64,
    pub duration_secs: f64,
    pub selected_audio_bitrate: u64,
    pub selected_video_bitrate: u64,
}

impl BitrateBudget {
    /// Plans the split for `target_bits` over `duration_secs`.
    ///
    /// The source audio bitrate is tried first, then [`AUDIO_FALLBACK_LADDER`];
    /// the first one leaving at least [`MIN_VIDEO_BITRATE`] for video wins. If
    /// none does, video is clamped to the floor and the source audio is kept.
    /// `duration_secs` must be positive.
    pub fn plan(target_bits: u64, duration_secs: f64, source_audio_bitrate: u64) -> Self {
        let total = total_bitrate(target_bits, duration_secs);

        let fits = std::iter::once(source_audio_bitrate)
            .chain(AUDIO_FALLBACK_LADDER)
            .find(|&audio| total.saturating_sub(audio) >= MIN_VIDEO_BITRATE);

        let (audio, video) = match fits {
            Some(audio) => (audio, total - audio),
            None => (source_audio_bitrate, MIN_VIDEO_BITRATE),
        };

        Self {
            target_total_bits: target_bits,
            duration_secs,
            selected_audio_bitrate: audio,
            selected_video_bitrate: video,
        }
    }

    pub fn total_bitrate(&self) -> u64 {
        total_bitrate(self.target_total_bits, self.duration_secs)
    }

    /// Expected output size: `(video + audio) * duration`.
    pub fn predicted_bits(&self) -> u64 {
        // Float-to-int casts saturate, so an absurd source bitrate caps at u64::MAX.
        let per_sec = self
            .selected_video_bitrate
            .saturating_add(self.selected_audio_bitrate);
        (per_sec as f64 * self.duration_secs) as u64
    }

    /// `-bufsize` value for the transcoder.
    pub fn buffer_size(&self) -> u64 {
        self.target_total_bits / BUFFER_DIVISOR
    }
}

/// Bits reserved for container overhead out of `target_bits`.
pub fn overhead_bits(target_bits: u64) -> u64 {
    (u128::from(target_bits) * u128::from(CONTAINER_OVERHEAD_PERCENT) / 100) as u64
}

/// `(target - overhead) / duration`, in bits per second.
pub fn total_bitrate(target_bits: u64, duration_secs: f64) -> u64 {
    if duration_secs <= 0.0 {
        return 0;
    }
    ((target_bits - overhead_bits(target_bits)) as f64 / duration_secs) as u64
}

/// Whether to run the transcoder for a file, decided before any encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncodeDecision {
    /// Current size is already within the target.
    AlreadyWithinTarget,
    /// Even the planned bitrates would not produce a smaller file.
    WouldNotShrink { predicted_bits: u64 },
    Encode(BitrateBudget),
}

/// Applies the skip rules around [`BitrateBudget::plan`].
pub fn decide(
    current_bits: u64,
    target_bits: u64,
    duration_secs: f64,
    source_audio_bitrate: u64,
) -> EncodeDecision {
    if current_bits <= target_bits {
        return EncodeDecision::AlreadyWithinTarget;
    }
    let budget = BitrateBudget::plan(target_bits, duration_secs, source_audio_bitrate);
    let predicted_bits = budget.predicted_bits();
    if predicted_bits > current_bits {
        return EncodeDecision::WouldNotShrink { predicted_bits };
    }
    EncodeDecision::Encode(budget)
}
