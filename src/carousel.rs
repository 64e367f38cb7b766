use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::debug;
use web_sys::{Document, Element};

use crate::config::{selectors, SiteConfig};
use crate::dom;
use crate::error::SiteResult;

/// Position within a fixed, non-empty ring of slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideIndex {
    index: usize,
    len: usize,
}

impl SlideIndex {
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { index: 0, len })
    }

    pub fn get(self) -> usize {
        self.index
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }
}

/// A slide that can carry the active marker.
pub trait Slide {
    fn set_active(&self, active: bool);
}

impl Slide for Element {
    fn set_active(&self, active: bool) {
        dom::set_class(self, selectors::ACTIVE, active);
    }
}

pub struct Carousel<S> {
    slides: Vec<S>,
    position: SlideIndex,
}

impl<S: Slide> Carousel<S> {
    pub fn new(slides: Vec<S>) -> Option<Self> {
        let position = SlideIndex::new(slides.len())?;
        Some(Self { slides, position })
    }

    fn show(&self) {
        let index = self.position.get();
        for (i, slide) in self.slides.iter().enumerate() {
            slide.set_active(i == index);
        }
    }

    pub fn next(&mut self) {
        self.position.next();
        self.show();
    }

    pub fn previous(&mut self) {
        self.position.previous();
        self.show();
    }
}

pub fn mount(document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let slides = dom::query_all(document, selectors::SLIDE);
    let (Some(next), Some(prev), Some(carousel)) = (
        dom::query(document, selectors::NEXT_BUTTON),
        dom::query(document, selectors::PREV_BUTTON),
        Carousel::new(slides),
    ) else {
        debug!("Testimonial slider incomplete, carousel inert");
        return Ok(());
    };

    let carousel = Rc::new(RefCell::new(carousel));
    {
        let carousel = carousel.clone();
        dom::listen(&next, "click", move |_| carousel.borrow_mut().next())?;
    }
    {
        let carousel = carousel.clone();
        dom::listen(&prev, "click", move |_| carousel.borrow_mut().previous())?;
    }

    // Runs for the whole page view, manual navigation does not reset it.
    Interval::new(config.carousel_interval_ms, move || carousel.borrow_mut().next()).forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;

    #[test]
    fn empty_ring_is_rejected() {
        assert_eq!(SlideIndex::new(0), None);
    }

    #[test]
    fn previous_from_start_wraps_to_last() {
        let mut index = SlideIndex::new(4).unwrap();
        assert_eq!(index.previous(), 3);
        assert_eq!(index.next(), 0);
    }

    #[test]
    fn single_slide_stays_put() {
        let mut index = SlideIndex::new(1).unwrap();
        assert_eq!(index.next(), 0);
        assert_eq!(index.previous(), 0);
    }

    struct FakeSlide(Cell<bool>);

    impl Slide for FakeSlide {
        fn set_active(&self, active: bool) {
            self.0.set(active);
        }
    }

    fn fake_carousel(len: usize) -> Carousel<FakeSlide> {
        let slides = (0..len).map(|_| FakeSlide(Cell::new(false))).collect();
        Carousel::new(slides).unwrap()
    }

    fn active_slides(carousel: &Carousel<FakeSlide>) -> Vec<usize> {
        carousel
            .slides
            .iter()
            .enumerate()
            .filter(|(_, slide)| slide.0.get())
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn previous_from_first_slide_activates_last() {
        let mut carousel = fake_carousel(3);
        carousel.previous();
        assert_eq!(active_slides(&carousel), vec![2]);
    }

    proptest! {
        #[test]
        fn exactly_one_slide_is_active(len in 1usize..12, moves in proptest::collection::vec(any::<bool>(), 1..64)) {
            let mut carousel = fake_carousel(len);
            for forward in moves {
                if forward {
                    carousel.next();
                } else {
                    carousel.previous();
                }
                prop_assert_eq!(active_slides(&carousel), vec![carousel.position.get()]);
            }
        }

        #[test]
        fn n_nexts_return_to_start(len in 1usize..50) {
            let mut index = SlideIndex::new(len).unwrap();
            for _ in 0..len {
                index.next();
            }
            prop_assert_eq!(index.get(), 0);
        }

        #[test]
        fn index_stays_in_range(len in 1usize..20, moves in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut index = SlideIndex::new(len).unwrap();
            let mut expected = 0i64;
            for forward in moves {
                if forward {
                    index.next();
                    expected += 1;
                } else {
                    index.previous();
                    expected -= 1;
                }
                prop_assert!(index.get() < len);
                prop_assert_eq!(index.get() as i64, expected.rem_euclid(len as i64));
            }
        }
    }
}
