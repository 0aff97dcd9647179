//! Active locale with change notification

use crate::catalog::Locale;
use tokio::sync::watch;

/// Owns the active locale.
///
/// `set` is the only way to change it; anything that renders
/// locale-dependent text either reads `active()` from the context it is
/// handed or holds a receiver from `subscribe()`.
#[derive(Debug)]
pub struct LocaleController {
    fallback: Locale,
    tx: watch::Sender<Locale>,
}

impl LocaleController {
    pub fn new(initial: Locale, fallback: Locale) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { fallback, tx }
    }

    /// Pick the starting locale: explicit choice, then the OS locale, then
    /// the fallback.
    pub fn initial(configured: Option<Locale>, fallback: Locale) -> Self {
        let initial = configured
            .or_else(Locale::detect_system)
            .unwrap_or(fallback);
        Self::new(initial, fallback)
    }

    pub fn active(&self) -> Locale {
        *self.tx.borrow()
    }

    /// The locale named by `code`. Unsupported codes resolve to the fallback.
    pub fn resolve(&self, code: &str) -> Locale {
        let locale = Locale::resolve(code, self.fallback);
        if Locale::parse(code).is_none() {
            tracing::info!("Unsupported locale `{code}`, using `{locale}`");
        }
        locale
    }

    /// Switch to an already resolved locale
    pub fn set(&self, locale: Locale) {
        let previous = self.tx.send_replace(locale);
        if previous != locale {
            tracing::info!("Locale changed from `{previous}` to `{locale}`");
        }
    }

    /// Receiver that observes every change
    pub fn subscribe(&self) -> watch::Receiver<Locale> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_updates_active() {
        let controller = LocaleController::new(Locale::En, Locale::En);
        controller.set(controller.resolve("es"));
        assert_eq!(controller.active(), Locale::Es);
    }

    #[test]
    fn test_unsupported_code_uses_fallback() {
        let controller = LocaleController::new(Locale::Es, Locale::En);
        assert_eq!(controller.resolve("fr"), Locale::En);
        assert_eq!(controller.active(), Locale::Es);
    }

    #[test]
    fn test_configured_locale_wins() {
        let controller = LocaleController::initial(Some(Locale::Es), Locale::En);
        assert_eq!(controller.active(), Locale::Es);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let controller = LocaleController::new(Locale::En, Locale::En);
        let mut rx = controller.subscribe();
        assert!(!rx.has_changed().unwrap());

        controller.set(controller.resolve("es-ES"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Locale::Es);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_subscriber_wakes_on_change() {
        let controller = LocaleController::new(Locale::En, Locale::En);
        let mut rx = controller.subscribe();
        controller.set(Locale::Es);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Locale::Es);
    }
}
