use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Dashboard,
    Results,
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let path = match self {
            Self::Dashboard => "/dashboard",
            Self::Results => "/results",
        };
        write!(f, "{path}")
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, view: View);
}

#[derive(Debug, Clone)]
pub struct ViewRouter {
    current: Arc<watch::Sender<View>>,
}

impl ViewRouter {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(View::Dashboard);
        Self {
            current: Arc::new(tx),
        }
    }

    pub fn current(&self) -> View {
        *self.current.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<View> {
        self.current.subscribe()
    }
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for ViewRouter {
    fn navigate(&self, view: View) {
        info!(%view, "navigating");
        self.current.send_replace(view);
    }
}

#[cfg(test)]
mod tests {
    use crate::navigation::{Navigator, View, ViewRouter};

    #[tokio::test]
    async fn navigation_is_observable() {
        let router = ViewRouter::new();
        assert_eq!(router.current(), View::Dashboard);
        let mut rx = router.subscribe();
        router.navigate(View::Results);
        rx.changed().await.expect("router dropped");
        assert_eq!(*rx.borrow(), View::Results);
        assert_eq!(router.current(), View::Results);
        assert_eq!(View::Results.to_string(), "/results");
    }
}
