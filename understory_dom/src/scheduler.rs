// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::future::Future;
use core::time::Duration;

/// Asynchronous waits provided by the host event loop.
///
/// In a browser, [`FrameScheduler::next_frame`] wraps `requestAnimationFrame`
/// and [`FrameScheduler::sleep`] wraps `setTimeout`. Neither wait can fail.
pub trait FrameScheduler {
    /// Resolves at the next animation-frame boundary.
    fn next_frame(&self) -> impl Future<Output = ()>;

    /// Resolves once `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}
