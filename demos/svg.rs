use delaunay2d::{next_halfedge, Delaunay, Point, EMPTY};
use std::{env, fs::File, io::Write};
const CANVAS_SIZE: f64 = 800.;
const POINT_SIZE: usize = 4;
const LINE_WIDTH: usize = 1;
const RAY_LENGTH: f64 = 40.;
const HULL_COLOR: &str = "green";
const LINE_COLOR: &str = "blue";
const RAY_COLOR: &str = "orange";
const POINT_COLOR: &str = "black";
const HULL_POINT_COLOR: &str = "red";

/// Takes the first argument and use as path to load points data. If no argument provided, loads one of the test fixtures data file
/// Example: cargo run --example svg -- tests/fixtures/basic.json
fn main() -> std::io::Result<()> {
    // load points from file
    let default_path = "tests/fixtures/clustered.json".to_string();
    let args = env::args().collect::<Vec<String>>();
    let path = args.get(1).unwrap_or(&default_path);
    let points: Vec<Point> = serde_json::from_reader::<_, Vec<(f64, f64)>>(File::open(path)?)?
        .iter()
        .map(|p| Point { x: p.0, y: p.1 })
        .collect();

    // triangulate and scale points for display
    let delaunay = Delaunay::from_points(&points);
    println!("{} triangles, hull {:?}", delaunay.len(), delaunay.hull);
    let points = center_and_scale(&points, &delaunay);

    // generate SVG
    let contents = format!(
        r#"
<svg viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">
<rect width="100%" height="100%" fill="white" />
    {circles}
    {lines}
    {rays}
</svg>"#,
        width = CANVAS_SIZE,
        height = CANVAS_SIZE,
        circles = render_point(&points, &delaunay),
        lines = (0..delaunay.triangles.len()).fold(String::new(), |acc, e| {
            if e > delaunay.halfedges[e] || delaunay.halfedges[e] == EMPTY {
                let start = &points[delaunay.triangles[e]];
                let end = &points[delaunay.triangles[next_halfedge(e)]];
                let color = if delaunay.halfedges[e] == EMPTY { HULL_COLOR } else { LINE_COLOR };
                acc + &line(start, end, color)
            } else {
                acc
            }
        }),
        rays = render_rays(&points, &delaunay),
    );
    File::create("triangulation.svg")?.write_all(contents.as_bytes())
}

fn line(start: &Point, end: &Point, color: &str) -> String {
    format!(
        r#"<line x1="{x0}" y1="{y0}" x2="{x1}" y2="{y1}" style="stroke:{color};stroke-width:{width}" />"#,
        x0 = start.x,
        y0 = start.y,
        x1 = end.x,
        y1 = end.y,
        width = LINE_WIDTH,
        color = color
    )
}

/// Finds the center point and farthest point from it, then generates a new vector of
/// scaled and offset points such that they fit between [0..SIZE]
fn center_and_scale(points: &[Point], d: &Delaunay) -> Vec<Point> {
    let center = &points[*d.triangles.first().unwrap_or(&0)];
    let farthest_distance = points
        .iter()
        .map(|p| {
            let (x, y) = (center.x - p.x, center.y - p.y);
            x * x + y * y
        })
        .fold(0.0, f64::max)
        .sqrt();
    let scale = CANVAS_SIZE / (farthest_distance * 2.0 + RAY_LENGTH);
    let offset = ((CANVAS_SIZE / 2.0) - (scale * center.x), (CANVAS_SIZE / 2.0) - (scale * center.y));
    points
        .iter()
        .map(|p| Point { x: scale * p.x + offset.0, y: scale * p.y + offset.1 })
        .collect()
}

/// Draws both outward rays of every hull point, the directions a Voronoi
/// diagram would extend its unbounded cells along.
fn render_rays(points: &[Point], d: &Delaunay) -> String {
    d.hull.iter().fold(String::new(), |acc, &h| {
        let p = &points[h];
        d.vectors[4 * h..4 * h + 4].chunks(2).fold(acc, |acc, ray| {
            let len = ray[0].hypot(ray[1]);
            if len == 0.0 {
                return acc;
            }
            let end = Point { x: p.x + ray[0] / len * RAY_LENGTH, y: p.y + ray[1] / len * RAY_LENGTH };
            acc + &line(p, &end, RAY_COLOR)
        })
    })
}

fn render_point(points: &[Point], d: &Delaunay) -> String {
    let mut circles = points.iter().enumerate().fold(String::new(), |acc, (i, p)| {
        let color = if d.hull_next(i).is_ok() { HULL_POINT_COLOR } else { POINT_COLOR };
        acc + &format!(
            r#"<circle cx="{x}" cy="{y}" r="{size}" fill="{color}"/>"#,
            x = p.x,
            y = p.y,
            size = POINT_SIZE,
            color = color
        )
    });

    // show ids for points if input is relatively small
    if points.len() < 100 {
        circles = points.iter().enumerate().fold(circles, |acc, (i, p)| {
            acc + &format!(r#"<text x="{x}" y="{y}" font-size="20" fill="black">{i}</text>"#, i = i, x = p.x + 10., y = p.y - 5.)
        })
    }

    circles
}
