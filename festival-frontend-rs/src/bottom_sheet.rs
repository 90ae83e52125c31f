//! The "found something?" sheet on the lost-and-found page.
//!
//! Closing plays a slide-down animation, so the sheet stays on screen for
//! [`CLOSE_ANIMATION`] after it's dismissed. Time is passed in by the caller.

use std::time::{Duration, Instant};

pub const CLOSE_ANIMATION: Duration = Duration::from_millis(300);

pub const NOTICE_TITLE: &str = "분실물을 발견하셨나요?";
pub const NOTICE_TEXT: &str = "대동제를 함께한 누군가가 애타게 찾고 있어요!\n학교를 벗어나기 전 소중한 물건 되찾을 수 있도록\n따뜻한 마음으로 분실물을 제보해주세요 😍";
pub const VERIFICATION_NOTICE: &str = "무분별한 게시판 이용 방지를 위해 사용자 인증을 받고 있으며,\n모든 데이터는 축제 기간 후 안전하게 삭제됩니다.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SheetPhase {
    #[default]
    Closed,
    Open,
    Closing {
        since: Instant,
    },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BottomSheet {
    phase: SheetPhase,
}

impl BottomSheet {
    pub fn phase(&self) -> SheetPhase {
        self.phase
    }

    /// Whether the sheet is on screen, including while it slides away.
    pub fn is_visible(&self) -> bool {
        self.phase != SheetPhase::Closed
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.phase, SheetPhase::Closing { .. })
    }

    pub fn open(&mut self) {
        if self.phase == SheetPhase::Closed {
            self.phase = SheetPhase::Open;
        }
    }

    /// Dismisses an open sheet. Used by the drag line.
    pub fn request_close(&mut self, now: Instant) {
        if self.phase == SheetPhase::Open {
            self.phase = SheetPhase::Closing { since: now };
        }
    }

    pub fn outside_click(&mut self, now: Instant) {
        self.request_close(now);
    }

    /// Finishes the close animation once it has run its course.
    pub fn tick(&mut self, now: Instant) {
        if let SheetPhase::Closing { since } = self.phase {
            if now.saturating_duration_since(since) >= CLOSE_ANIMATION {
                self.phase = SheetPhase::Closed;
            }
        }
    }
}
