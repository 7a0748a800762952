//! Built-in marker list used when no scene file is supplied

use crate::core::geo::Coordinates;
use crate::layers::marker::{Marker, MarkerCategory};

/// The three demo markers the viewer starts with.
pub fn initial_markers() -> Vec<Marker> {
    vec![
        Marker::new(
            "1",
            "Citadel of Dawn",
            MarkerCategory::City,
            Coordinates::new(50.0, 50.0),
        )
        .with_description(
            "An ancient fortress guarding the eastern borders of the kingdom. \
             Legend says the first ray of the sun always falls on its spire.",
        )
        .with_image("./city.jpg"),
        Marker::new(
            "2",
            "Whispering Forest",
            MarkerCategory::Forest,
            Coordinates::new(25.0, 40.0),
        )
        .with_description(
            "A mystic forest whose trees trade places at night. \
             Travellers are advised not to leave the path.",
        )
        .with_image("./forest.jpg"),
        Marker::new(
            "3",
            "Dragon Caves",
            MarkerCategory::Dungeon,
            Coordinates::new(70.0, 70.0),
        )
        .with_description(
            "Deep halls filled with gold and danger. The last great wyrm sleeps here.",
        )
        .with_image("./dungeon.jpg"),
    ]
}
