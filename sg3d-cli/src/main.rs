/// SG3D Model Inspector
///
/// Loads a Wavefront OBJ model through the asynchronous loader, builds
/// its render-ready buffers and prints a summary of what a rendering
/// backend would receive.
///
/// Usage: sg3d [path/to/model.obj]

use std::env;
use std::process::ExitCode;

use sg3d_core::{load_obj, Camera, Color, ColorSpec, Mesh, NormalMode, PrimitiveMode, Scene};

fn main() -> ExitCode {
    colog::init();

    let args: Vec<String> = env::args().collect();

    let mut scene = Scene::new();
    let camera = Camera::new(1024, 512);

    match args.get(1) {
        Some(path) => {
            log::info!("loading model: {}", path);
            let data = match load_obj(path).wait() {
                Ok(data) => data,
                Err(error) => {
                    log::error!("could not load {}: {}", path, error);
                    return ExitCode::FAILURE;
                }
            };
            log::info!(
                "parsed {} vertices, {} triangles",
                data.vertex_count(),
                data.triangle_count()
            );

            let mesh = match Mesh::from_model_data(
                &data,
                ColorSpec::Uniform(Color::white()),
                NormalMode::Smooth,
            ) {
                Ok(mesh) => mesh,
                Err(error) => {
                    log::error!("could not build mesh from {}: {}", path, error);
                    return ExitCode::FAILURE;
                }
            };
            scene.add_mesh(mesh);
        }
        None => {
            log::info!("no model given, inspecting a generated cube and sphere");
            let cuboid = Mesh::cuboid(ColorSpec::Uniform(Color::new(0.8, 0.2, 0.2)))
                .expect("cuboid generator uses a valid color");
            let sphere = Mesh::sphere(ColorSpec::Uniform(Color::new(0.2, 0.2, 0.8)), 20)
                .expect("sphere generator uses a valid color");
            scene.add_mesh(cuboid);
            scene.add_mesh(sphere);
        }
    }

    let view = camera.view_matrix();
    for (index, packet) in scene.render_packets(view).enumerate() {
        let mode = match packet.mode {
            PrimitiveMode::Triangles => "triangles",
            PrimitiveMode::Lines => "lines",
        };
        println!(
            "object {}: {} vertices ({}), {} position floats, {} color floats, \
             {} normal floats, {} texcoord floats",
            index,
            packet.vertex_count,
            mode,
            packet.positions.len(),
            packet.colors.len(),
            packet.normals.len(),
            packet.texcoords.len(),
        );
        println!("  world matrix row 3: {:?}", &packet.world.as_array()[12..16]);
    }
    println!(
        "projection matrix row 2: {:?}",
        &camera.projection_matrix().as_array()[8..12]
    );

    ExitCode::SUCCESS
}
