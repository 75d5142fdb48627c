use crate::{
    mesh::{primitive::TILE_VERTEX_RADIUS, MeshLayer},
    render::MapRenderer,
    Decoration, HexMap, TileRecord,
};
use std::{cmp::Ordering, f64::consts::TAU};
use svg::{
    node::{
        element::{Circle, Group, Polygon},
        Comment,
    },
    Document,
};

/// Decorations are drawn a bit darker than the tier they belong to, so they
/// stand out from the tiles underneath
const DECORATION_SHADE: f32 = 0.7;

/// Render a map as an SVG. This is a 2D top-down rendering, in full color.
/// SVG's y axis runs along the map's z axis.
pub fn map_to_svg(map: &HexMap, renderer: &MapRenderer) -> Document {
    let config = map.config();
    let render_config = renderer.render_config();
    let visible_layers = renderer.visible_layers();

    // Set the view box based on the boundary radius, plus enough room for
    // the outermost tiles (or the water, which is wider still)
    let boundary = config.layout.boundary.resolve(config.radius).max(0.0);
    let extent = (boundary
        + TILE_VERTEX_RADIUS
        + map.water().map_or(0.0, |_| TILE_VERTEX_RADIUS))
    .ceil();

    let mut document = Document::new()
        .set(
            "viewBox",
            (
                // Top-left corner
                -extent,
                -extent,
                // Width and height
                extent * 2.0,
                extent * 2.0,
            ),
        )
        .add(Comment::new(format!("\n{:#?}\n", config)));

    if let Some(water) = map.water() {
        if visible_layers.contains(&MeshLayer::Water) {
            document = document.add(
                Circle::new()
                    .set("cx", water.center.x)
                    .set("cy", water.center.z)
                    .set("r", water.bottom_radius)
                    .set(
                        "fill",
                        renderer.layer_color(MeshLayer::Water).to_html(),
                    ),
            );
        }
    }

    for tile in map.tiles() {
        if visible_layers.contains(&MeshLayer::Tier(tile.tier())) {
            document = document.add(draw_tile(renderer, tile));
        }
    }

    if render_config.show_decorations {
        for decoration in map.decorations() {
            if visible_layers.contains(&decoration.layer()) {
                if let Some(group) = draw_decoration(renderer, decoration) {
                    document = document.add(group);
                }
            }
        }
    }

    document
}

/// Generate an SVG polygon for a single tile
fn draw_tile(renderer: &MapRenderer, tile: &TileRecord) -> Group {
    let position = tile.position();
    Group::new()
        // Translate the tile to its correct position
        .set(
            "transform",
            format!("translate({} {})", position.x, position.z),
        )
        .add(Comment::new(tile.coord().to_string())) // Readability!
        .add(
            Polygon::new()
                // Same vertex order as the 3D prism: the first vertex points
                // along +z, then around towards +x
                .set(
                    "points",
                    (0..6)
                        .map(|i| {
                            let angle = i as f64 * TAU / 6.0;
                            (
                                TILE_VERTEX_RADIUS * angle.sin(),
                                TILE_VERTEX_RADIUS * angle.cos(),
                            )
                        })
                        .collect::<Vec<_>>(),
                )
                .set("fill", renderer.tier_color(tile.tier()).to_html()),
        )
}

/// Draw a decoration as seen from above. Rocks and trees become circles,
/// clouds are left out since they'd hide the map.
fn draw_decoration(
    renderer: &MapRenderer,
    decoration: &Decoration,
) -> Option<Group> {
    let fill =
        (renderer.layer_color(decoration.layer()) * DECORATION_SHADE).to_html();
    let (center, radius) = match decoration {
        Decoration::Rock(sphere) => (sphere.center, sphere.radius),
        // The widest layer is the only one visible from above
        Decoration::Tree { layers } => layers
            .iter()
            .max_by(|a, b| {
                a.bottom_radius
                    .partial_cmp(&b.bottom_radius)
                    .unwrap_or(Ordering::Equal)
            })
            .map(|layer| (layer.center, layer.bottom_radius))?,
        Decoration::Cloud { .. } => return None,
    };

    Some(
        Group::new().add(
            Circle::new()
                .set("cx", center.x)
                .set("cy", center.z)
                .set("r", radius)
                .set("fill", fill),
        ),
    )
}
