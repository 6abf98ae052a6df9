//! Coordination of paginated preview renders.
//!
//! Renders are requested far more often than they finish. Each request takes
//! a ticket; only the newest ticket may commit, so the last request wins even
//! when an older render completes later. Resources produced by superseded
//! renders are destroyed as soon as they reach the coordinator.

use log::{debug, warn};

use crate::error::CollaboratorError;

/// A live paginated render owned by the external paginator.
pub trait RenderHandle {
    fn page_count(&self) -> usize;

    /// Release the render's DOM and internal resources.
    fn destroy(&mut self);
}

/// The external paginator: lays out an HTML fragment with a stylesheet.
pub trait Paginator {
    type Handle: RenderHandle;

    fn preview(&mut self, html: &str, css: &str) -> Result<Self::Handle, CollaboratorError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewStatus {
    Idle,
    Rendering,
    Ready { pages: usize },
    /// The paginator failed; preview and export stay off for the session.
    Unavailable { reason: String },
}

pub struct PreviewCoordinator<H: RenderHandle> {
    latest: u64,
    committed: Option<H>,
    status: PreviewStatus,
}

impl<H: RenderHandle> Default for PreviewCoordinator<H> {
    fn default() -> Self {
        Self {
            latest: 0,
            committed: None,
            status: PreviewStatus::Idle,
        }
    }
}

impl<H: RenderHandle> PreviewCoordinator<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a render, superseding any in flight.
    pub fn begin(&mut self) -> RenderTicket {
        self.latest += 1;
        if !self.is_unavailable() {
            self.status = PreviewStatus::Rendering;
        }
        RenderTicket(self.latest)
    }

    /// Whether `ticket` is still the newest request. Check after every suspension point.
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Offer a finished render. Stale renders are destroyed and `false` returned;
    /// otherwise the previously committed render is destroyed and replaced.
    pub fn commit(&mut self, ticket: RenderTicket, mut handle: H) -> bool {
        if !self.is_current(ticket) || self.is_unavailable() {
            debug!("discarding superseded render {:?}", ticket);
            handle.destroy();
            return false;
        }
        if let Some(mut previous) = self.committed.take() {
            previous.destroy();
        }
        self.status = PreviewStatus::Ready {
            pages: handle.page_count(),
        };
        self.committed = Some(handle);
        true
    }

    /// Record a paginator failure. Failures of superseded renders are ignored.
    pub fn fail(&mut self, ticket: RenderTicket, error: CollaboratorError) {
        if !self.is_current(ticket) {
            return;
        }
        warn!("preview unavailable: {}", error);
        if let Some(mut previous) = self.committed.take() {
            previous.destroy();
        }
        self.status = PreviewStatus::Unavailable { reason: error.0 };
    }

    /// Run one render through `paginator` and settle it.
    pub fn render<P>(&mut self, paginator: &mut P, html: &str, css: &str) -> &PreviewStatus
    where
        P: Paginator<Handle = H>,
    {
        let ticket = self.begin();
        if !self.is_unavailable() {
            match paginator.preview(html, css) {
                Ok(handle) => {
                    self.commit(ticket, handle);
                }
                Err(error) => self.fail(ticket, error),
            }
        }
        &self.status
    }

    pub fn status(&self) -> &PreviewStatus {
        &self.status
    }

    pub fn committed(&self) -> Option<&H> {
        self.committed.as_ref()
    }

    /// Printing and export need a committed preview.
    pub fn can_export(&self) -> bool {
        matches!(self.status, PreviewStatus::Ready { .. })
    }

    fn is_unavailable(&self) -> bool {
        matches!(self.status, PreviewStatus::Unavailable { .. })
    }

    /// Destroy the committed render and supersede anything in flight.
    pub fn teardown(&mut self) {
        self.latest += 1;
        if let Some(mut previous) = self.committed.take() {
            previous.destroy();
        }
        if !self.is_unavailable() {
            self.status = PreviewStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records destroyed render ids in a shared log.
    struct FakeRender {
        id: u32,
        pages: usize,
        destroyed: Rc<RefCell<Vec<u32>>>,
    }

    impl RenderHandle for FakeRender {
        fn page_count(&self) -> usize {
            self.pages
        }

        fn destroy(&mut self) {
            self.destroyed.borrow_mut().push(self.id);
        }
    }

    struct FakePaginator {
        next_id: u32,
        fail: bool,
        destroyed: Rc<RefCell<Vec<u32>>>,
    }

    impl FakePaginator {
        fn new() -> Self {
            Self {
                next_id: 0,
                fail: false,
                destroyed: Rc::default(),
            }
        }

        fn make(&mut self, pages: usize) -> FakeRender {
            self.next_id += 1;
            FakeRender {
                id: self.next_id,
                pages,
                destroyed: Rc::clone(&self.destroyed),
            }
        }
    }

    impl Paginator for FakePaginator {
        type Handle = FakeRender;

        fn preview(&mut self, html: &str, _css: &str) -> Result<FakeRender, CollaboratorError> {
            if self.fail {
                return Err(CollaboratorError("layout crashed".to_string()));
            }
            Ok(self.make(html.len()))
        }
    }

    #[test]
    fn last_request_wins() {
        let mut paginator = FakePaginator::new();
        let mut coordinator = PreviewCoordinator::new();

        let first = coordinator.begin();
        let second = coordinator.begin();
        assert!(!coordinator.is_current(first));

        // The newer render finishes first and commits
        let newer = paginator.make(3);
        assert!(coordinator.commit(second, newer));
        // The older one arrives late and is thrown away
        let older = paginator.make(9);
        assert!(!coordinator.commit(first, older));

        assert_eq!(coordinator.status(), &PreviewStatus::Ready { pages: 3 });
        assert_eq!(coordinator.committed().map(|r| r.id), Some(1));
        assert_eq!(*paginator.destroyed.borrow(), [2]);
    }

    #[test]
    fn new_commit_destroys_previous() {
        let mut paginator = FakePaginator::new();
        let mut coordinator = PreviewCoordinator::new();
        coordinator.render(&mut paginator, "ab", "");
        coordinator.render(&mut paginator, "abcd", "");
        assert_eq!(coordinator.status(), &PreviewStatus::Ready { pages: 4 });
        assert_eq!(*paginator.destroyed.borrow(), [1]);
        assert!(coordinator.can_export());

        coordinator.teardown();
        assert_eq!(*paginator.destroyed.borrow(), [1, 2]);
        assert_eq!(coordinator.status(), &PreviewStatus::Idle);
        assert!(!coordinator.can_export());
    }

    #[test]
    fn failure_disables_preview_for_the_session() {
        let mut paginator = FakePaginator::new();
        let mut coordinator = PreviewCoordinator::new();
        coordinator.render(&mut paginator, "ok", "");

        paginator.fail = true;
        let status = coordinator.render(&mut paginator, "boom", "").clone();
        assert_eq!(
            status,
            PreviewStatus::Unavailable {
                reason: "layout crashed".to_string()
            }
        );
        assert!(!coordinator.can_export());
        assert_eq!(*paginator.destroyed.borrow(), [1]);

        // No retry, even once the paginator would succeed
        paginator.fail = false;
        coordinator.render(&mut paginator, "again", "");
        assert!(!coordinator.can_export());
        assert_eq!(paginator.next_id, 1);
    }

    #[test]
    fn stale_failure_is_ignored() {
        let mut coordinator: PreviewCoordinator<FakeRender> = PreviewCoordinator::new();
        let stale = coordinator.begin();
        let _current = coordinator.begin();
        coordinator.fail(stale, CollaboratorError("late".to_string()));
        assert_eq!(coordinator.status(), &PreviewStatus::Rendering);
    }
}
