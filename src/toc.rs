//! TOC controller: derive and maintain an interactive table of
//! contents from a content region's heading structure.
//!
//! The controller is an explicit instance over a [`Page`] — no
//! ambient globals. Host events arrive as messages ([`TocEvent`]);
//! the dispatch result tells the host whether an animation-frame tick
//! needs scheduling. The navigation list is a static snapshot: built
//! once at mount, never incrementally updated if the content changes
//! afterwards.

use log::debug;

use crate::config::Config;
use crate::page::{NodeId, Page};
use crate::types::{HeadingLevel, NavEntry};

/// Presentation class toggled on the single active link.
pub const ACTIVE_CLASS: &str = "active";

/// Presentation class marking subsection list items for indentation.
pub const SUB_CLASS: &str = "toc-sub";

/// Host event delivered to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocEvent {
    /// A navigation entry was selected, by entry index. The default
    /// navigation jump is suppressed; the controller issues exactly
    /// one smooth scroll and a history-only fragment update.
    Activate(usize),
    /// The viewport scrolled. Recomputation is deferred to the next
    /// frame; events arriving while one is already pending are
    /// dropped.
    Scroll,
    /// The animation-frame tick previously requested via
    /// [`Reaction::ScheduleFrame`].
    Frame,
}

/// What the host must do after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Reaction {
    None,
    /// Deliver one [`TocEvent::Frame`] on the next animation frame.
    ScheduleFrame,
}

/// The controller. One per page view; discarded with the page.
#[derive(Debug)]
pub struct TocController {
    entries: Vec<NavEntry>,
    /// Heading node per entry, same order.
    targets: Vec<NodeId>,
    /// Link node per entry, same order.
    links: Vec<NodeId>,
    list: NodeId,
    active: Option<usize>,
    frame_pending: bool,
    header_offset: u32,
}

impl TocController {
    /// Mount on a page.
    ///
    /// Resolves the content container, the target list and the
    /// wrapping panel by their configured identifiers. Any of the
    /// three absent is a silent no-op (`None`, page untouched) — not
    /// every page has a TOC panel. Zero qualifying headings hides the
    /// panel and also returns `None`: a TOC with nothing to show is
    /// suppressed, not left empty.
    ///
    /// Headings without an identifier get one assigned from their
    /// position (`heading-<index>`) — stable for this render, not
    /// across renders with re-ordered content. Identifiers already
    /// present are never overwritten.
    pub fn mount(page: &mut Page, cfg: &Config) -> Option<Self> {
        let content = page.find_by_id(&cfg.content_id)?;
        let list = page.find_by_id(&cfg.list_id)?;
        let panel = page.find_by_id(&cfg.panel_id)?;

        let headings = collect_headings(page, content);
        if headings.is_empty() {
            page.hide(panel);
            debug!("toc: no qualifying headings, panel hidden");
            return None;
        }

        let mut entries = Vec::with_capacity(headings.len());
        let mut targets = Vec::with_capacity(headings.len());
        let mut links = Vec::with_capacity(headings.len());

        for (i, &(node, level)) in headings.iter().enumerate() {
            if page.id(node).is_none() {
                page.set_id(node, &format!("heading-{i}"));
            }
            let id = page.id(node).unwrap_or_default().to_string();
            let label = page.text(node).to_string();

            let item = page.create_element("li");
            if level == HeadingLevel::Subsection {
                page.add_class(item, SUB_CLASS);
            }
            let link = page.create_element("a");
            page.set_text(link, &label);
            page.append_child(item, link);
            page.append_child(list, item);

            entries.push(NavEntry {
                id,
                label,
                depth: level.depth(),
            });
            targets.push(node);
            links.push(link);
        }

        debug!("toc: mounted with {} entries", entries.len());

        let mut ctl = Self {
            entries,
            targets,
            links,
            list,
            active: None,
            frame_pending: false,
            header_offset: cfg.header_offset,
        };
        // Active entry must be correct before any user scroll.
        ctl.sync_active(page);
        Some(ctl)
    }

    /// Deliver one host event.
    pub fn dispatch(&mut self, page: &mut Page, event: TocEvent) -> Reaction {
        match event {
            TocEvent::Activate(index) => {
                self.activate(page, index);
                Reaction::None
            }
            TocEvent::Scroll => {
                if self.frame_pending {
                    return Reaction::None;
                }
                self.frame_pending = true;
                Reaction::ScheduleFrame
            }
            TocEvent::Frame => {
                self.frame_pending = false;
                self.sync_active(page);
                Reaction::None
            }
        }
    }

    /// True while a frame tick is owed to the controller.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.frame_pending
    }

    /// Navigation entries, in document order.
    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Index of the active entry, if any.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Tear down: remove the generated list items and clear the
    /// active state. Heading identifiers stay — they live for the
    /// page, not the controller.
    pub fn unmount(self, page: &mut Page) {
        page.clear_children(self.list);
        for &link in &self.links {
            page.remove_class(link, ACTIVE_CLASS);
        }
        debug!("toc: unmounted");
    }

    fn activate(&mut self, page: &mut Page, index: usize) {
        let Some(&target) = self.targets.get(index) else {
            return;
        };
        page.scroll_into_view(target);
        page.set_fragment(&self.entries[index].id);
        debug!(
            "toc: activate entry {} -> #{}",
            index, self.entries[index].id
        );
    }

    /// Recompute which entry is active for the current scroll offset.
    ///
    /// The active heading is the LAST one (document order) whose top
    /// is at or above the scroll offset plus the header allowance;
    /// none qualifying means no active entry. Reset-then-set keeps at
    /// most one link carrying the class no matter what state preceded
    /// the call.
    fn sync_active(&mut self, page: &mut Page) {
        let adjusted = page.scroll_y().saturating_add(self.header_offset);

        let mut best = None;
        for (i, &target) in self.targets.iter().enumerate() {
            if page.top(target) <= adjusted {
                best = Some(i);
            }
        }

        for &link in &self.links {
            page.remove_class(link, ACTIVE_CLASS);
        }
        if let Some(i) = best {
            page.add_class(self.links[i], ACTIVE_CLASS);
        }
        self.active = best;
    }
}

/// Qualifying headings under `root`, in document order (depth-first
/// over the subtree).
fn collect_headings(page: &Page, root: NodeId) -> Vec<(NodeId, HeadingLevel)> {
    let mut out = Vec::new();
    walk(page, root, &mut out);
    out
}

fn walk(page: &Page, node: NodeId, out: &mut Vec<(NodeId, HeadingLevel)>) {
    for &child in page.children(node) {
        if let Some(level) = HeadingLevel::from_tag(page.tag(child)) {
            out.push((child, level));
        }
        walk(page, child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{self, PageRefs};
    use crate::types::ScannedHeading;

    fn heading(level: HeadingLevel, text: &str, line: u32) -> ScannedHeading {
        ScannedHeading {
            level,
            text: text.into(),
            id: None,
            line,
        }
    }

    /// A small post: Introduction (section), Details (subsection),
    /// Conclusion (section).
    fn article() -> Vec<ScannedHeading> {
        vec![
            heading(HeadingLevel::Section, "Introduction", 1),
            heading(HeadingLevel::Subsection, "Details", 10),
            heading(HeadingLevel::Section, "Conclusion", 20),
        ]
    }

    fn mounted() -> (Page, PageRefs, TocController, Config) {
        let cfg = Config::default();
        let (mut page, refs) = page::from_headings(&article(), &cfg);
        let ctl = TocController::mount(&mut page, &cfg).expect("mount");
        (page, refs, ctl, cfg)
    }

    #[test]
    fn one_entry_per_heading_in_document_order() {
        let (_, _, ctl, _) = mounted();
        let entries = ctl.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].label, "Introduction");
        assert_eq!(entries[0].depth, 0);
        assert_eq!(entries[1].label, "Details");
        assert_eq!(entries[1].depth, 1);
        assert_eq!(entries[2].label, "Conclusion");
        assert_eq!(entries[2].depth, 0);

        // Distinct, position-derived identifiers
        assert_eq!(entries[0].id, "heading-0");
        assert_eq!(entries[1].id, "heading-1");
        assert_eq!(entries[2].id, "heading-2");
    }

    #[test]
    fn zero_headings_hides_panel_and_suppresses() {
        let cfg = Config::default();
        let (mut page, refs) = page::from_headings(&[], &cfg);
        assert!(TocController::mount(&mut page, &cfg).is_none());
        assert!(page.is_hidden(refs.panel));
        assert!(page.children(refs.list).is_empty());
    }

    #[test]
    fn missing_mount_point_is_silent_noop() {
        let cfg = Config::default();

        // Content container present, list and panel absent.
        let mut page = Page::new();
        let content = page.create_element("main");
        page.set_id(content, &cfg.content_id);
        let h = page.create_element("h1");
        page.set_text(h, "Orphan");
        page.append_child(content, h);

        assert!(TocController::mount(&mut page, &cfg).is_none());
        // Untouched: no id assigned, nothing created.
        assert_eq!(page.id(h), None);
    }

    #[test]
    fn existing_identifiers_never_overwritten() {
        let cfg = Config::default();
        let mut headings = article();
        headings[1].id = Some("custom-details".into());
        let (mut page, refs) = page::from_headings(&headings, &cfg);

        let ctl = TocController::mount(&mut page, &cfg).expect("mount");
        assert_eq!(ctl.entries()[1].id, "custom-details");

        // Re-initialization on the same document keeps every id.
        ctl.unmount(&mut page);
        let ctl = TocController::mount(&mut page, &cfg).expect("remount");
        assert_eq!(ctl.entries()[0].id, "heading-0");
        assert_eq!(ctl.entries()[1].id, "custom-details");
        assert_eq!(ctl.entries()[2].id, "heading-2");
        assert_eq!(page.children(refs.list).len(), 3);
    }

    #[test]
    fn initial_recompute_runs_at_mount() {
        let cfg = Config::default();
        let (mut page, _) = page::from_headings(&article(), &cfg);
        // Page already scrolled past the second heading before mount.
        page.scroll_to(10 * cfg.line_height);
        let ctl = TocController::mount(&mut page, &cfg).expect("mount");
        assert_eq!(ctl.active(), Some(1));
    }

    #[test]
    fn before_first_heading_nothing_is_active() {
        let cfg = Config::default();
        let headings = vec![heading(HeadingLevel::Section, "Deep", 50)];
        let (mut page, _) = page::from_headings(&headings, &cfg);
        let ctl = TocController::mount(&mut page, &cfg).expect("mount");
        // scroll 0 + offset 100 < top 1200
        assert_eq!(ctl.active(), None);
    }

    #[test]
    fn exact_adjusted_offset_activates() {
        let (mut page, refs, mut ctl, cfg) = mounted();
        let conclusion = page.children(refs.content)[2];
        let top = page.top(conclusion);

        // scroll_y + header_offset == top: boundary counts as reached.
        page.scroll_to(top - cfg.header_offset);
        let _ = ctl.dispatch(&mut page, TocEvent::Scroll);
        let _ = ctl.dispatch(&mut page, TocEvent::Frame);
        assert_eq!(ctl.active(), Some(2));

        // One pixel earlier the previous heading still wins.
        page.scroll_to(top - cfg.header_offset - 1);
        let _ = ctl.dispatch(&mut page, TocEvent::Scroll);
        let _ = ctl.dispatch(&mut page, TocEvent::Frame);
        assert_eq!(ctl.active(), Some(1));
    }

    #[test]
    fn last_qualifying_heading_wins() {
        let (mut page, _, mut ctl, _) = mounted();
        // Far past everything: all three qualify, last one is active.
        page.scroll_to(100_000);
        let _ = ctl.dispatch(&mut page, TocEvent::Scroll);
        let _ = ctl.dispatch(&mut page, TocEvent::Frame);
        assert_eq!(ctl.active(), Some(2));
    }

    #[test]
    fn at_most_one_active_link() {
        let (mut page, refs, mut ctl, _) = mounted();
        let offsets = [0u32, 5_000, 120, 100_000, 0];
        for y in offsets {
            page.scroll_to(y);
            let _ = ctl.dispatch(&mut page, TocEvent::Scroll);
            let _ = ctl.dispatch(&mut page, TocEvent::Frame);

            let active_links = page
                .children(refs.list)
                .iter()
                .flat_map(|&item| page.children(item))
                .filter(|&&link| page.has_class(link, ACTIVE_CLASS))
                .count();
            assert!(active_links <= 1, "more than one active link at y={y}");
        }
    }

    #[test]
    fn activation_scrolls_once_and_updates_fragment() {
        let (mut page, _, mut ctl, _) = mounted();
        let before = page.scroll_request_count();
        let _ = ctl.dispatch(&mut page, TocEvent::Activate(1));
        assert_eq!(page.scroll_request_count(), before + 1);
        assert_eq!(page.fragment(), Some("heading-1"));
    }

    #[test]
    fn activation_out_of_range_is_ignored() {
        let (mut page, _, mut ctl, _) = mounted();
        let _ = ctl.dispatch(&mut page, TocEvent::Activate(99));
        assert_eq!(page.scroll_request_count(), 0);
        assert_eq!(page.fragment(), None);
    }

    #[test]
    fn scroll_events_coalesce_to_one_frame() {
        let (mut page, _, mut ctl, _) = mounted();

        assert_eq!(
            ctl.dispatch(&mut page, TocEvent::Scroll),
            Reaction::ScheduleFrame
        );
        // Re-entrant scrolls before the tick are dropped.
        assert_eq!(ctl.dispatch(&mut page, TocEvent::Scroll), Reaction::None);
        assert_eq!(ctl.dispatch(&mut page, TocEvent::Scroll), Reaction::None);
        assert!(ctl.needs_frame());

        assert_eq!(ctl.dispatch(&mut page, TocEvent::Frame), Reaction::None);
        assert!(!ctl.needs_frame());

        // Next scroll schedules again.
        assert_eq!(
            ctl.dispatch(&mut page, TocEvent::Scroll),
            Reaction::ScheduleFrame
        );
    }

    #[test]
    fn subsection_items_carry_indent_class() {
        let (page, refs, _ctl, _) = mounted();
        let items = page.children(refs.list);
        assert!(!page.has_class(items[0], SUB_CLASS));
        assert!(page.has_class(items[1], SUB_CLASS));
        assert!(!page.has_class(items[2], SUB_CLASS));
    }

    #[test]
    fn unmount_removes_generated_items() {
        let (mut page, refs, ctl, _) = mounted();
        assert_eq!(page.children(refs.list).len(), 3);
        ctl.unmount(&mut page);
        assert!(page.children(refs.list).is_empty());
        assert!(!page.is_hidden(refs.panel));
    }

    #[test]
    fn nested_headings_found_in_document_order() {
        let cfg = Config::default();
        let mut page = Page::new();
        let content = page.create_element("main");
        page.set_id(content, &cfg.content_id);

        let section = page.create_element("section");
        page.append_child(content, section);
        let h1 = page.create_element("h1");
        page.set_text(h1, "Wrapped");
        page.append_child(section, h1);
        let h2 = page.create_element("h2");
        page.set_text(h2, "Inner");
        page.append_child(section, h2);
        let h3 = page.create_element("h3");
        page.set_text(h3, "Too deep");
        page.append_child(section, h3);

        let panel = page.create_element("aside");
        page.set_id(panel, &cfg.panel_id);
        let list = page.create_element("ul");
        page.set_id(list, &cfg.list_id);
        page.append_child(panel, list);

        let ctl = TocController::mount(&mut page, &cfg).expect("mount");
        let labels: Vec<&str> = ctl.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["Wrapped", "Inner"]);
    }
}
