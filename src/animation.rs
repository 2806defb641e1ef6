//! Property animations on a view's render transform.

use crate::events::Listener;
use crate::view::{Transform, ViewId};
use std::time::{Duration, Instant};

/// An animatable render property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Alpha,
    TranslationX,
    TranslationY,
    ScaleX,
    ScaleY,
    /// Degrees, clockwise.
    Rotation,
}

impl Property {
    pub fn get(self, transform: &Transform) -> f64 {
        match self {
            Property::Alpha => transform.opacity,
            Property::TranslationX => transform.translation.x,
            Property::TranslationY => transform.translation.y,
            Property::ScaleX => transform.scale.x,
            Property::ScaleY => transform.scale.y,
            Property::Rotation => transform.rotation,
        }
    }

    pub fn set(self, transform: &mut Transform, value: f64) {
        match self {
            Property::Alpha => transform.opacity = value.max(0.).min(1.),
            Property::TranslationX => transform.translation.x = value,
            Property::TranslationY => transform.translation.y = value,
            Property::ScaleX => transform.scale.x = value,
            Property::ScaleY => transform.scale.y = value,
            Property::Rotation => transform.rotation = value,
        }
    }
}

/// A description of an animation. Values are interpolated linearly.
#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    /// Moves one property to a target value.
    Tween {
        property: Property,
        /// Start value; `None` starts from wherever the property is when the tween begins.
        from: Option<f64>,
        to: f64,
        /// `None` uses the tree's default animation duration.
        duration: Option<Duration>,
        delay: Duration,
    },
    /// Runs all animations at once.
    Parallel(Vec<Animation>),
    /// Runs animations one after another.
    Sequential(Vec<Animation>),
}

impl Animation {
    pub fn tween(property: Property, to: f64) -> Animation {
        Animation::Tween {
            property,
            from: None,
            to,
            duration: None,
            delay: Duration::from_secs(0),
        }
    }

    pub fn fade_in() -> Animation {
        Animation::tween(Property::Alpha, 1.).from(0.)
    }

    pub fn fade_out() -> Animation {
        Animation::tween(Property::Alpha, 0.).from(1.)
    }

    /// Translates from one offset to another.
    pub fn translate(from: (f64, f64), to: (f64, f64)) -> Animation {
        Animation::Parallel(vec![
            Animation::tween(Property::TranslationX, to.0).from(from.0),
            Animation::tween(Property::TranslationY, to.1).from(from.1),
        ])
    }

    pub fn scale(from: (f64, f64), to: (f64, f64)) -> Animation {
        Animation::Parallel(vec![
            Animation::tween(Property::ScaleX, to.0).from(from.0),
            Animation::tween(Property::ScaleY, to.1).from(from.1),
        ])
    }

    pub fn rotate(from: f64, to: f64) -> Animation {
        Animation::tween(Property::Rotation, to).from(from)
    }

    pub fn parallel(animations: Vec<Animation>) -> Animation {
        Animation::Parallel(animations)
    }

    pub fn sequential(animations: Vec<Animation>) -> Animation {
        Animation::Sequential(animations)
    }

    /// Sets the start value of a tween. No effect on compositions.
    pub fn from(mut self, value: f64) -> Animation {
        if let Animation::Tween { from, .. } = &mut self {
            *from = Some(value);
        }
        self
    }

    /// Sets the duration of a tween, or of every tween in a composition.
    pub fn with_duration(mut self, value: Duration) -> Animation {
        self.visit_durations(&mut |duration| *duration = Some(value));
        self
    }

    /// Delays a tween. Compositions delay their first tweens.
    pub fn with_delay(mut self, value: Duration) -> Animation {
        match &mut self {
            Animation::Tween { delay, .. } => *delay = value,
            Animation::Parallel(children) => {
                for child in children.iter_mut() {
                    *child = child.clone().with_delay(value);
                }
            }
            Animation::Sequential(children) => {
                if let Some(first) = children.first_mut() {
                    *first = first.clone().with_delay(value);
                }
            }
        }
        self
    }

    fn visit_durations(&mut self, f: &mut dyn FnMut(&mut Option<Duration>)) {
        match self {
            Animation::Tween { duration, .. } => f(duration),
            Animation::Parallel(children) | Animation::Sequential(children) => {
                for child in children {
                    child.visit_durations(f);
                }
            }
        }
    }

    /// Total running time, with unset durations taken as `default`.
    pub fn total_duration(&self, default: Duration) -> Duration {
        match self {
            Animation::Tween {
                duration, delay, ..
            } => *delay + duration.unwrap_or(default),
            Animation::Parallel(children) => children
                .iter()
                .map(|child| child.total_duration(default))
                .max()
                .unwrap_or_default(),
            Animation::Sequential(children) => children
                .iter()
                .map(|child| child.total_duration(default))
                .sum(),
        }
    }

    /// Flattens into tracks with absolute start offsets.
    fn tracks(&self, offset: Duration, default: Duration, out: &mut Vec<Track>) {
        match self {
            Animation::Tween {
                property,
                from,
                to,
                duration,
                delay,
            } => out.push(Track {
                property: *property,
                from: *from,
                to: *to,
                start: offset + *delay,
                duration: duration.unwrap_or(default),
            }),
            Animation::Parallel(children) => {
                for child in children {
                    child.tracks(offset, default, out);
                }
            }
            Animation::Sequential(children) => {
                let mut offset = offset;
                for child in children {
                    child.tracks(offset, default, out);
                    offset += child.total_duration(default);
                }
            }
        }
    }
}

/// Identifies a running animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationId(u64);

/// Animation lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationEvent {
    Started,
    Ended,
    /// Stopped early, e.g. because the view was detached. Properties stay where they were.
    Cancelled,
}

pub type AnimationListener = Listener<(AnimationId, AnimationEvent)>;

/// Mutable access to view transforms.
pub(crate) trait Transforms {
    fn transform_mut(&mut self, view: ViewId) -> Option<&mut Transform>;
}

#[derive(Debug, Clone)]
struct Track {
    property: Property,
    from: Option<f64>,
    to: f64,
    start: Duration,
    duration: Duration,
}

impl Track {
    fn apply(&mut self, transform: &mut Transform, elapsed: Duration) {
        if elapsed < self.start {
            return;
        }
        let from = *self
            .from
            .get_or_insert_with(|| self.property.get(transform));
        let progress = if self.duration.as_secs_f64() <= 0. {
            1.
        } else {
            ((elapsed - self.start).as_secs_f64() / self.duration.as_secs_f64()).min(1.)
        };
        self.property
            .set(transform, from + (self.to - from) * progress);
    }
}

#[derive(Debug)]
struct Running {
    id: AnimationId,
    view: ViewId,
    tracks: Vec<Track>,
    start: Instant,
    total: Duration,
    listener: Option<AnimationListener>,
}

/// Runs animations, advanced by the tree's tick.
#[derive(Debug, Default)]
pub struct Animator {
    running: Vec<Running>,
    next_id: u64,
}

impl Animator {
    pub fn new() -> Animator {
        Animator::default()
    }

    pub(crate) fn start(
        &mut self,
        view: ViewId,
        animation: &Animation,
        default_duration: Duration,
        now: Instant,
        listener: Option<AnimationListener>,
    ) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;

        let mut tracks = Vec::new();
        animation.tracks(Duration::from_secs(0), default_duration, &mut tracks);
        let total = animation.total_duration(default_duration);

        if let Some(listener) = &listener {
            listener.call((id, AnimationEvent::Started));
        }
        self.running.push(Running {
            id,
            view,
            tracks,
            start: now,
            total,
            listener,
        });
        id
    }

    /// Advances all animations to `now`. Returns the views whose transforms changed.
    pub(crate) fn tick(&mut self, now: Instant, targets: &mut dyn Transforms) -> Vec<ViewId> {
        let mut touched = Vec::new();
        let mut finished = Vec::new();

        for (index, running) in self.running.iter_mut().enumerate() {
            let elapsed = now.saturating_duration_since(running.start);
            let transform = match targets.transform_mut(running.view) {
                Some(transform) => transform,
                None => {
                    finished.push(index);
                    continue;
                }
            };
            for track in &mut running.tracks {
                track.apply(transform, elapsed);
            }
            touched.push(running.view);
            if elapsed >= running.total {
                finished.push(index);
            }
        }

        for index in finished.into_iter().rev() {
            let running = self.running.remove(index);
            tracing::trace!(view = %running.view, "animation ended");
            if let Some(listener) = running.listener {
                listener.call((running.id, AnimationEvent::Ended));
            }
        }
        touched
    }

    pub fn cancel(&mut self, id: AnimationId) -> bool {
        self.cancel_where(|running| running.id == id)
    }

    /// Cancels every animation bound to the view.
    pub fn cancel_view(&mut self, view: ViewId) -> bool {
        self.cancel_where(|running| running.view == view)
    }

    fn cancel_where(&mut self, predicate: impl Fn(&Running) -> bool) -> bool {
        let (cancelled, kept): (Vec<Running>, Vec<Running>) =
            self.running.drain(..).partition(|running| predicate(running));
        self.running = kept;
        for running in &cancelled {
            if let Some(listener) = &running.listener {
                listener.call((running.id, AnimationEvent::Cancelled));
            }
        }
        !cancelled.is_empty()
    }

    pub fn is_animating(&self, view: ViewId) -> bool {
        self.running.iter().any(|running| running.view == view)
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    impl Transforms for HashMap<ViewId, Transform> {
        fn transform_mut(&mut self, view: ViewId) -> Option<&mut Transform> {
            self.get_mut(&view)
        }
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn fade_interpolates_linearly() {
        let view = ViewId::new();
        let mut transforms = HashMap::new();
        transforms.insert(view, Transform::identity());

        let start = Instant::now();
        let mut animator = Animator::new();
        animator.start(view, &Animation::fade_in(), ms(300), start, None);

        animator.tick(start + ms(150), &mut transforms);
        assert!(close(transforms[&view].opacity, 0.5));
        animator.tick(start + ms(400), &mut transforms);
        assert!(close(transforms[&view].opacity, 1.));
        assert!(animator.is_empty());
    }

    #[test]
    fn sequential_runs_in_order() {
        let view = ViewId::new();
        let mut transforms = HashMap::new();
        transforms.insert(view, Transform::identity());

        let animation = Animation::sequential(vec![
            Animation::tween(Property::TranslationX, 100.).with_duration(ms(100)),
            Animation::rotate(0., 90.).with_duration(ms(100)),
        ]);
        assert_eq!(animation.total_duration(ms(300)), ms(200));

        let start = Instant::now();
        let mut animator = Animator::new();
        animator.start(view, &animation, ms(300), start, None);

        animator.tick(start + ms(50), &mut transforms);
        assert!(close(transforms[&view].translation.x, 50.));
        assert!(close(transforms[&view].rotation, 0.));

        animator.tick(start + ms(150), &mut transforms);
        assert!(close(transforms[&view].translation.x, 100.));
        assert!(close(transforms[&view].rotation, 45.));
    }

    #[test]
    fn listener_sees_lifecycle() {
        let view = ViewId::new();
        let mut transforms = HashMap::new();
        transforms.insert(view, Transform::identity());

        let events = Arc::new(Mutex::new(Vec::new()));
        let listener = {
            let events = Arc::clone(&events);
            Listener::new(move |(_, event): (AnimationId, AnimationEvent)| {
                events.lock().push(event)
            })
        };

        let start = Instant::now();
        let mut animator = Animator::new();
        animator.start(view, &Animation::fade_out(), ms(100), start, Some(listener.clone()));
        animator.tick(start + ms(200), &mut transforms);
        animator.start(view, &Animation::fade_in(), ms(100), start, Some(listener));
        assert!(animator.is_animating(view));
        assert!(animator.cancel_view(view));

        assert_eq!(
            *events.lock(),
            vec![
                AnimationEvent::Started,
                AnimationEvent::Ended,
                AnimationEvent::Started,
                AnimationEvent::Cancelled,
            ]
        );
    }
}
