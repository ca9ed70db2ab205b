//! Arena index newtypes. All cross-references inside the model go through
//! one of these rather than owning pointers, so the whole graph can be
//! built, shared across worker threads, and torn down without reference
//! counting.

macro_rules! index_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(i: usize) -> Self {
                $name(i as u32)
            }
        }
    };
}

index_type!(ContinentIdx);
index_type!(CountryIdx);
index_type!(RegionIdx);
index_type!(SystemIdx);
index_type!(RouteIdx);
index_type!(ColocationRingIdx);
index_type!(ConcurrencyRingIdx);

/// A waypoint identified by the route that owns it and its position in that
/// route's waypoint list. Waypoints have no arena of their own: they live
/// inline in `Route::waypoints`, exclusively owned by their route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaypointRef {
    pub route: RouteIdx,
    pub index: u32,
}

impl WaypointRef {
    pub fn new(route: RouteIdx, index: usize) -> Self {
        Self { route, index: index as u32 }
    }
}

/// A segment identified by the route that owns it and its position in that
/// route's segment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentRef {
    pub route: RouteIdx,
    pub index: u32,
}

impl SegmentRef {
    pub fn new(route: RouteIdx, index: usize) -> Self {
        Self { route, index: index as u32 }
    }
}
