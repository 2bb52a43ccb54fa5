//! Gallery image preview in a native modal dialog.

use crate::constants::{classes, ids};
use crate::platform::{Capabilities, Document, ElementId, Point};

/// Attribute holding the full-size image source of a gallery item.
const IMAGE_ATTRIBUTE: &str = "data-img";

/// Opens gallery images in `#imgModal` and closes it on request.
#[derive(Debug, Clone)]
pub struct GalleryModal {
    modal: Option<ElementId>,
    image: Option<ElementId>,
    close: Option<ElementId>,
    gallery: Option<ElementId>,
    supported: bool,
}

impl GalleryModal {
    /// Binds to the modal, its image, its close button, and the gallery.
    #[must_use]
    pub fn bind(doc: &dyn Document, capabilities: &Capabilities) -> Self {
        let modal = doc.element_by_id(ids::MODAL);
        let supported = capabilities.native_dialog && modal.is_some();
        if !supported {
            tracing::debug!(native_dialog = capabilities.native_dialog, "gallery modal inert");
        }
        Self {
            modal,
            image: doc.element_by_id(ids::MODAL_IMAGE),
            close: doc.element_by_id(ids::MODAL_CLOSE),
            gallery: doc.element_by_id(ids::GALLERY),
            supported,
        }
    }

    /// Whether the modal can be used at all.
    #[must_use]
    pub const fn is_supported(&self) -> bool { self.supported }

    /// Whether the modal is open.
    #[must_use]
    pub fn is_open(&self, doc: &dyn Document) -> bool {
        self.supported && self.modal.is_some_and(|m| doc.is_dialog_open(m))
    }

    /// Handles a click at a viewport position. Returns `true` if the modal changed.
    pub fn on_click(&self, doc: &mut dyn Document, target: ElementId, position: Point) -> bool {
        if let Some(src) = self.gallery_source(doc, target) {
            return self.open(doc, &src);
        }
        if self.close.is_some_and(|close| doc.is_inclusive_descendant(target, close)) {
            return self.close(doc);
        }
        if let Some(modal) = self.modal
            && self.is_open(doc)
            && doc.is_inclusive_descendant(target, modal)
            && doc.bounding_rect(modal).is_some_and(|rect| !rect.contains(position))
        {
            return self.close(doc);
        }
        false
    }

    /// Handles a key press. `Escape` closes the open modal.
    pub fn on_key(&self, doc: &mut dyn Document, key: &str) -> bool {
        key == "Escape" && self.is_open(doc) && self.close(doc)
    }

    /// Handles the dialog's `close` event by clearing the image source.
    pub fn on_closed(&self, doc: &mut dyn Document, dialog: ElementId) {
        if !self.supported || self.modal != Some(dialog) {
            return;
        }
        if let Some(image) = self.image {
            doc.set_attribute(image, "src", "");
        }
    }

    /// Image source of the gallery button containing the click target.
    fn gallery_source(&self, doc: &dyn Document, target: ElementId) -> Option<String> {
        let gallery = self.gallery?;
        if !doc.is_inclusive_descendant(target, gallery) {
            return None;
        }
        let item = doc.closest(target, classes::GALLERY_ITEM)?;
        if !doc.is_inclusive_descendant(item, gallery) {
            return None;
        }
        if doc.tag_name(item).as_deref() != Some("button") {
            return None;
        }
        doc.attribute(item, IMAGE_ATTRIBUTE).filter(|src| !src.is_empty())
    }

    fn open(&self, doc: &mut dyn Document, src: &str) -> bool {
        let (Some(modal), Some(image)) = (self.modal, self.image) else {
            return false;
        };
        if !self.supported {
            return false;
        }
        doc.set_attribute(image, "src", src);
        doc.show_modal(modal);
        tracing::debug!(src, "gallery modal opened");
        true
    }

    fn close(&self, doc: &mut dyn Document) -> bool {
        let Some(modal) = self.modal.filter(|_| self.supported) else {
            return false;
        };
        let was_open = doc.is_dialog_open(modal);
        doc.close_dialog(modal);
        if was_open {
            self.on_closed(doc, modal);
        }
        was_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryPage, Rect};

    struct Fixture {
        page: MemoryPage,
        modal: ElementId,
        image: ElementId,
        close: ElementId,
        thumb: ElementId,
    }

    fn fixture() -> Fixture {
        let mut page = MemoryPage::default();
        let body = page.body();
        let gallery = page.add_element(body, "div", Some("gallery"), &[], None);
        let item = page.add_element(gallery, "button", None, &["gallery-item"], None);
        page.seed_attribute(item, "data-img", "img/one.jpg");
        let thumb = page.add_element(item, "img", None, &[], None);
        let modal = page.add_element(body, "dialog", Some("imgModal"), &[], None);
        page.set_rect(modal, Rect::new(100.0, 100.0, 600.0, 400.0), true);
        let image = page.add_element(modal, "img", Some("modalImg"), &[], None);
        let close = page.add_element(modal, "button", Some("modalClose"), &[], None);
        Fixture { page, modal, image, close, thumb }
    }

    #[test]
    fn test_click_on_item_descendant_opens_modal() {
        let mut f = fixture();
        let gallery = GalleryModal::bind(&f.page, &Capabilities::default());
        assert!(gallery.on_click(&mut f.page, f.thumb, Point::default()));
        assert!(f.page.is_dialog_open(f.modal));
        assert_eq!(f.page.attribute(f.image, "src").as_deref(), Some("img/one.jpg"));
    }

    #[test]
    fn test_close_button_clears_source() {
        let mut f = fixture();
        let gallery = GalleryModal::bind(&f.page, &Capabilities::default());
        gallery.on_click(&mut f.page, f.thumb, Point::default());

        assert!(gallery.on_click(&mut f.page, f.close, Point::new(650.0, 120.0)));
        assert!(!f.page.is_dialog_open(f.modal));
        assert_eq!(f.page.attribute(f.image, "src").as_deref(), Some(""));
    }

    #[test]
    fn test_backdrop_click_closes_inside_click_does_not() {
        let mut f = fixture();
        let gallery = GalleryModal::bind(&f.page, &Capabilities::default());
        gallery.on_click(&mut f.page, f.thumb, Point::default());

        assert!(!gallery.on_click(&mut f.page, f.modal, Point::new(300.0, 300.0)));
        assert!(f.page.is_dialog_open(f.modal));

        assert!(gallery.on_click(&mut f.page, f.modal, Point::new(20.0, 20.0)));
        assert!(!f.page.is_dialog_open(f.modal));
    }

    #[test]
    fn test_escape_closes_open_modal() {
        let mut f = fixture();
        let gallery = GalleryModal::bind(&f.page, &Capabilities::default());
        assert!(!gallery.on_key(&mut f.page, "Escape"));
        gallery.on_click(&mut f.page, f.thumb, Point::default());
        assert!(!gallery.on_key(&mut f.page, "Enter"));
        assert!(gallery.on_key(&mut f.page, "Escape"));
        assert!(!f.page.is_dialog_open(f.modal));
    }

    #[test]
    fn test_without_dialog_support_is_inert() {
        let mut f = fixture();
        let caps = Capabilities { native_dialog: false, ..Capabilities::default() };
        let gallery = GalleryModal::bind(&f.page, &caps);
        assert!(!gallery.is_supported());
        assert!(!gallery.on_click(&mut f.page, f.thumb, Point::default()));
        assert!(!f.page.is_dialog_open(f.modal));
    }

    #[test]
    fn test_non_button_item_is_ignored() {
        let mut f = fixture();
        let gallery_root = f.page.element_by_id("gallery").unwrap();
        let tile = f.page.add_element(gallery_root, "div", None, &["gallery-item"], None);
        f.page.seed_attribute(tile, "data-img", "img/two.jpg");
        let gallery = GalleryModal::bind(&f.page, &Capabilities::default());

        assert!(!gallery.on_click(&mut f.page, tile, Point::default()));
        assert!(!f.page.is_dialog_open(f.modal));
        assert!(gallery.on_click(&mut f.page, f.thumb, Point::default()));
    }

    #[test]
    fn test_item_without_source_is_ignored() {
        let mut f = fixture();
        let item = f.page.parent(f.thumb).unwrap();
        f.page.seed_attribute(item, "data-img", "");
        let gallery = GalleryModal::bind(&f.page, &Capabilities::default());
        assert!(!gallery.on_click(&mut f.page, f.thumb, Point::default()));
    }
}
