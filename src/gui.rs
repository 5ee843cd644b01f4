//! Control panel bound directly to the simulation's render parameters.

use crate::params::{Material, RenderParams, Shading};
use crate::simulation::Simulation;

pub fn control_panel(ctx: &egui::Context, simulation: &mut Simulation, fps: f32) {
    egui::Window::new("Wave")
        .default_pos([3.0, 3.0])
        .default_size([265.0, 345.0])
        .show(ctx, |ui| {
            ui.label(format!("time\t {:.3}", simulation.clock.time()));
            ui.label(format!("fps \t {fps:.1} fps"));

            let params = &mut simulation.params;

            egui::CollapsingHeader::new("Mesh")
                .default_open(true)
                .show(ui, |ui| mesh_section(ui, params));

            egui::CollapsingHeader::new("Points")
                .default_open(true)
                .show(ui, |ui| points_section(ui, params));
        });
}

fn mesh_section(ui: &mut egui::Ui, params: &mut RenderParams) {
    ui.checkbox(&mut params.show_mesh, "Draw Triangle Mesh");
    color_row(ui, &mut params.mesh_material.color, "Mesh Color");
    shininess_row(ui, &mut params.mesh_material, "Mesh Shininess");

    egui::ComboBox::from_label("Mesh Shading")
        .selected_text(params.shading.label())
        .show_ui(ui, |ui| {
            for shading in Shading::ALL {
                ui.selectable_value(&mut params.shading, shading, shading.label());
            }
        });

    ui.separator();

    ui.checkbox(&mut params.show_wireframe, "Draw Wireframe");
    color_row(ui, &mut params.wireframe_color, "Wireframe Color");
}

fn points_section(ui: &mut egui::Ui, params: &mut RenderParams) {
    ui.checkbox(&mut params.show_points, "Draw Points");
    ui.horizontal(|ui| {
        ui.add(
            egui::DragValue::new(&mut params.point_radius)
                .speed(1e-5)
                .range(RenderParams::POINT_RADIUS_RANGE)
                .fixed_decimals(4),
        );
        ui.label("Points Radius");
    });
    color_row(ui, &mut params.point_material.color, "Points Color");
    shininess_row(ui, &mut params.point_material, "Points Shininess");
}

fn color_row(ui: &mut egui::Ui, color: &mut [f32; 3], label: &str) {
    ui.horizontal(|ui| {
        ui.color_edit_button_rgb(color);
        ui.label(label);
    });
}

fn shininess_row(ui: &mut egui::Ui, material: &mut Material, label: &str) {
    ui.horizontal(|ui| {
        ui.add(
            egui::DragValue::new(&mut material.shininess)
                .speed(1e-2)
                .range(Material::SHININESS_RANGE),
        );
        ui.label(label);
    });
}
