use crate::core::evaluator::snapshot;
use crate::core::{Clock, StatusRenderer, StatusSnapshot, StoreHoursConfig};
use crate::utils::error::Result;
use crate::utils::validation::validate_range;
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);
pub const MAX_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Re-evaluates the store status on a fixed period and hands each snapshot to
/// the renderer. The first evaluation happens immediately.
pub struct StatusRefresher<C: Clock, R: StatusRenderer> {
    config: StoreHoursConfig,
    clock: C,
    renderer: R,
    period: Duration,
}

impl<C: Clock, R: StatusRenderer> StatusRefresher<C, R> {
    pub fn new(config: StoreHoursConfig, clock: C, renderer: R) -> Self {
        Self {
            config,
            clock,
            renderer,
            period: DEFAULT_REFRESH_INTERVAL,
        }
    }

    /// Sets the refresh period, between 1 ms and 24 h.
    pub fn with_period(mut self, period: Duration) -> Result<Self> {
        validate_range(
            "refresh.interval_ms",
            period.as_millis(),
            1,
            MAX_REFRESH_INTERVAL.as_millis(),
        )?;
        self.period = period;
        Ok(self)
    }

    /// Evaluates once and renders the result.
    pub async fn refresh_once(&self) -> Result<StatusSnapshot> {
        let snap = snapshot(&self.config, self.clock.now());
        tracing::debug!(
            "Evaluated {} at {} ({})",
            snap.status.classification,
            snap.evaluated_at.format("%H:%M"),
            snap.status.display_text
        );

        self.renderer.render(&snap).await?;
        Ok(snap)
    }

    /// Runs until `shutdown` resolves. Returns the number of evaluations.
    pub async fn run_until<F>(&self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        self.drive(shutdown, None).await
    }

    /// Runs exactly `ticks` evaluations, the first one immediately.
    pub async fn run_for(&self, ticks: u64) -> u64 {
        self.drive(std::future::pending(), Some(ticks)).await
    }

    async fn drive<F>(&self, shutdown: F, limit: Option<u64>) -> u64
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(
            "🕒 Refreshing store status every {:?} (hours {:02}:00-{:02}:00)",
            self.period,
            self.config.open_hour,
            self.config.close_hour
        );

        let mut evaluations = 0u64;
        loop {
            if limit.is_some_and(|max| evaluations >= max) {
                break;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("🛑 Shutdown requested, stopping refresh loop");
                    break;
                }
                _ = ticker.tick() => {
                    evaluations += 1;
                    // 單次渲染失敗不中斷循環，下個週期再試
                    if let Err(e) = self.refresh_once().await {
                        tracing::error!(
                            "❌ Rendering via {} failed: {} (Category: {:?}, Severity: {:?})",
                            self.renderer.name(),
                            e,
                            e.category(),
                            e.severity()
                        );
                        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                    }
                }
            }
        }

        tracing::info!("Refresh loop finished after {} evaluations", evaluations);
        evaluations
    }
}

/// Resolves on Ctrl-C. If the signal handler cannot be installed the loop
/// keeps running until the process is killed.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Classification, FixedClock};
    use crate::utils::error::StatusError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingRenderer {
        seen: Arc<Mutex<Vec<StatusSnapshot>>>,
        fail: bool,
    }

    #[async_trait]
    impl StatusRenderer for RecordingRenderer {
        async fn render(&self, snapshot: &StatusSnapshot) -> Result<()> {
            self.seen.lock().unwrap().push(snapshot.clone());
            if self.fail {
                return Err(StatusError::RenderError {
                    target: "test".to_string(),
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn clock_at(hour: u32, minute: u32) -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_refresh_once_renders_snapshot() {
        let renderer = RecordingRenderer::default();
        let refresher =
            StatusRefresher::new(StoreHoursConfig::default(), clock_at(21, 5), renderer.clone());

        let snap = tokio_test::assert_ok!(refresher.refresh_once().await);
        assert_eq!(snap.status.classification, Classification::ClosingSoon);
        assert_eq!(snap.status.minutes_until_close, Some(55));
        assert_eq!(renderer.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_once_surfaces_render_errors() {
        let renderer = RecordingRenderer {
            fail: true,
            ..Default::default()
        };
        let refresher = StatusRefresher::new(StoreHoursConfig::default(), clock_at(9, 0), renderer);
        tokio_test::assert_err!(refresher.refresh_once().await);
    }

    #[test]
    fn test_with_period_rejects_zero_and_huge_periods() {
        let build = || {
            StatusRefresher::new(
                StoreHoursConfig::default(),
                clock_at(9, 0),
                RecordingRenderer::default(),
            )
        };

        assert!(matches!(
            build().with_period(Duration::ZERO),
            Err(StatusError::InvalidConfigValueError { .. })
        ));
        assert!(build().with_period(Duration::from_secs(2 * 24 * 60 * 60)).is_err());
        assert!(build().with_period(Duration::from_millis(1)).is_ok());
        assert!(build().with_period(MAX_REFRESH_INTERVAL).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_for_ticks_on_period() {
        let renderer = RecordingRenderer::default();
        let refresher =
            StatusRefresher::new(StoreHoursConfig::default(), clock_at(9, 0), renderer.clone());

        let start = tokio::time::Instant::now();
        let count = refresher.run_for(3).await;

        assert_eq!(count, 3);
        assert_eq!(renderer.seen.lock().unwrap().len(), 3);
        // 第一次立即執行，之後每 60 秒一次
        assert_eq!(start.elapsed(), Duration::from_secs(120));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_stops_on_shutdown() {
        let renderer = RecordingRenderer::default();
        let refresher =
            StatusRefresher::new(StoreHoursConfig::default(), clock_at(9, 0), renderer.clone());

        let count = refresher
            .run_until(tokio::time::sleep(Duration::from_secs(150)))
            .await;

        assert_eq!(count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_failures_do_not_stop_loop() {
        let renderer = RecordingRenderer {
            fail: true,
            ..Default::default()
        };
        let refresher =
            StatusRefresher::new(StoreHoursConfig::default(), clock_at(9, 0), renderer.clone())
                .with_period(Duration::from_secs(5))
                .unwrap();

        assert_eq!(refresher.run_for(4).await, 4);
        assert_eq!(renderer.seen.lock().unwrap().len(), 4);
    }
}
