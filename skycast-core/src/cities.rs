use crate::model::{Coordinate, Location};

/// A city with a known position, usable without geocoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub coordinate: Coordinate,
}

impl City {
    pub fn location(&self) -> Location {
        Location::new(self.name, None, self.coordinate)
    }
}

pub const DEFAULT_CITY: &str = "London";

pub const CITIES: &[City] = &[
    City { name: "São Paulo", coordinate: Coordinate::new(-23.5505, -46.6333) },
    City { name: "Rio de Janeiro", coordinate: Coordinate::new(-22.9068, -43.1729) },
    City { name: "Lisbon", coordinate: Coordinate::new(38.7223, -9.1393) },
    City { name: "New York", coordinate: Coordinate::new(40.7128, -74.0060) },
    City { name: "Tokyo", coordinate: Coordinate::new(35.6762, 139.6503) },
    City { name: "London", coordinate: Coordinate::new(51.5074, -0.1278) },
];

/// Case-insensitive lookup by name.
pub fn find(name: &str) -> Option<&'static City> {
    let wanted = name.trim().to_lowercase();
    CITIES.iter().find(|c| c.name.to_lowercase() == wanted)
}
