use model::location::Location;

/// Reveals a route one point per tick.
#[derive(Debug, Clone)]
pub struct RouteAnimation {
    path: Vec<Location>,
    shown: usize,
}

impl RouteAnimation {
    pub fn new(path: Vec<Location>) -> Self {
        Self { path, shown: 0 }
    }

    /// Shows the next point. Returns `false` once the whole route is visible.
    pub fn tick(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.shown += 1;
        true
    }

    pub fn visible(&self) -> &[Location] {
        &self.path[..self.shown]
    }

    /// The most recently revealed point, where a marker would be drawn.
    pub fn head(&self) -> Option<&Location> {
        self.visible().last()
    }

    pub fn is_finished(&self) -> bool {
        self.shown >= self.path.len()
    }

    pub fn reset(&mut self) {
        self.shown = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_route_point_by_point() {
        let path = vec![
            Location::new(24.0, 46.0),
            Location::new(24.5, 46.5),
            Location::new(25.0, 47.0),
        ];
        let mut animation = RouteAnimation::new(path.clone());
        assert!(animation.visible().is_empty());
        assert_eq!(animation.head(), None);

        assert!(animation.tick());
        assert!(animation.tick());
        assert_eq!(animation.visible(), &path[..2]);
        assert_eq!(animation.head(), Some(&path[1]));

        assert!(animation.tick());
        assert!(animation.is_finished());
        assert!(!animation.tick());
        assert_eq!(animation.visible().len(), 3);

        animation.reset();
        assert!(!animation.is_finished());
        assert!(animation.visible().is_empty());
    }

    #[test]
    fn empty_route_is_finished() {
        let mut animation = RouteAnimation::new(vec![]);
        assert!(animation.is_finished());
        assert!(!animation.tick());
    }
}
