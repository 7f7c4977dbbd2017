use geo::BoundingRect;
use geo_types::{Coord, LineString};
use serde::{Deserialize, Serialize};

const EARTH_RADIUS: f64 = 6378137.0;

/// Tolerance used when comparing camera regions, in degrees.
pub const REGION_EPSILON: f64 = 1e-9;

/// A geographical coordinate with latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Calculates the distance to another coordinate in meters using the Haversine formula
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lng = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS * c
    }

    /// Whether two coordinates are equal within `epsilon` degrees on both axes
    pub fn approx_eq(&self, other: &Coordinate, epsilon: f64) -> bool {
        (self.latitude - other.latitude).abs() <= epsilon
            && (self.longitude - other.longitude).abs() <= epsilon
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Coord {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Coordinate::new(value.y, value.x)
    }
}

/// The visible map viewport: a centre plus latitude/longitude spans in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center: Coordinate,
    pub latitude_span: f64,
    pub longitude_span: f64,
}

impl Region {
    pub fn new(center: Coordinate, latitude_span: f64, longitude_span: f64) -> Self {
        Self {
            center,
            latitude_span,
            longitude_span,
        }
    }

    /// Square region (same span on both axes) centred on `center`
    pub fn around(center: Coordinate, span: f64) -> Self {
        Self::new(center, span, span)
    }

    /// Corner bounds of this region
    pub fn bounds(&self) -> GeoBounds {
        let half_lat = self.latitude_span / 2.0;
        let half_lng = self.longitude_span / 2.0;
        GeoBounds::from_edges(
            self.center.latitude - half_lat,
            self.center.longitude - half_lng,
            self.center.latitude + half_lat,
            self.center.longitude + half_lng,
        )
    }

    /// Checks if the region contains a point
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.bounds().contains(point)
    }

    /// Compares centre and spans within `epsilon` degrees
    pub fn approx_eq(&self, other: &Region, epsilon: f64) -> bool {
        self.center.approx_eq(&other.center, epsilon)
            && (self.latitude_span - other.latitude_span).abs() <= epsilon
            && (self.longitude_span - other.longitude_span).abs() <= epsilon
    }
}

/// An axis-aligned bounding box of geographical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl GeoBounds {
    pub fn new(south_west: Coordinate, north_east: Coordinate) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual edges
    pub fn from_edges(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(Coordinate::new(south, west), Coordinate::new(north, east))
    }

    /// Smallest bounds enclosing every coordinate of a path, or `None` for an empty path
    pub fn from_path(path: &[Coordinate]) -> Option<Self> {
        let line: LineString<f64> = path.iter().map(|c| Coord::from(*c)).collect();
        line.bounding_rect().map(|rect| {
            Self::new(Coordinate::from(rect.min()), Coordinate::from(rect.max()))
        })
    }

    /// Longitude extent in degrees
    pub fn width(&self) -> f64 {
        self.north_east.longitude - self.south_west.longitude
    }

    /// Latitude extent in degrees
    pub fn height(&self) -> f64 {
        self.north_east.latitude - self.south_west.latitude
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south_west.latitude + self.north_east.latitude) / 2.0,
            (self.south_west.longitude + self.north_east.longitude) / 2.0,
        )
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &Coordinate) -> bool {
        point.latitude >= self.south_west.latitude
            && point.latitude <= self.north_east.latitude
            && point.longitude >= self.south_west.longitude
            && point.longitude <= self.north_east.longitude
    }

    /// Grows the box by `ratio * width` on the west and east sides and
    /// `ratio * height` on the south and north sides.
    pub fn expand_by_ratio(&self, ratio: f64) -> Self {
        let dx = self.width() * ratio;
        let dy = self.height() * ratio;
        Self::from_edges(
            self.south_west.latitude - dy,
            self.south_west.longitude - dx,
            self.north_east.latitude + dy,
            self.north_east.longitude + dx,
        )
    }

    /// Viewport covering exactly these bounds
    pub fn to_region(&self) -> Region {
        Region::new(self.center(), self.height(), self.width())
    }
}
