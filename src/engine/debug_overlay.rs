use super::assets::ImageAsset;

pub struct DebugStats {
    pub fps: u32,
    pub frame_time_avg_ms: f32,
    pub frame_time_min_ms: f32,
    pub frame_time_max_ms: f32,
    pub entity_count: usize,
    pub resolution: (u32, u32),
    pub player_position: glam::Vec3,
    pub grounded: bool,
    pub npc_phase: &'static str,
    pub npc_position: glam::Vec3,
    pub npc_visible: bool,
    pub jumpscare_active: bool,
    /// Seconds until the pending reset, if any.
    pub reset_in: Option<f64>,
    pub resets: u32,
    pub segment_offsets: Vec<f32>,
    pub sim_time: f64,
}

impl DebugStats {
    /// Panel text, one entry per row.
    pub fn lines(&self) -> Vec<String> {
        let (p, n) = (self.player_position, self.npc_position);
        let encounter = match self.reset_in {
            Some(t) if self.jumpscare_active => format!("Jumpscare! reset in {:.2} s", t.max(0.0)),
            _ => format!("Resets: {}", self.resets),
        };
        let offsets: Vec<String> = self.segment_offsets.iter().map(|z| format!("{z:.0}")).collect();
        vec![
            format!("FPS: {}", self.fps),
            format!(
                "Frame: {:.2} ms (min: {:.1} | max: {:.1})",
                self.frame_time_avg_ms, self.frame_time_min_ms, self.frame_time_max_ms
            ),
            format!("Entities: {} | {} x {}", self.entity_count, self.resolution.0, self.resolution.1),
            format!("Sim time: {:.1} s", self.sim_time),
            format!("Player: ({:.1}, {:.1}, {:.1}){}", p.x, p.y, p.z, if self.grounded { "" } else { "  airborne" }),
            format!("NPC: {} at ({:.1}, {:.1}){}", self.npc_phase, n.x, n.z, if self.npc_visible { "" } else { "  hidden" }),
            encounter,
            format!("Segments: [{}]", offsets.join(", ")),
        ]
    }
}

/// egui layer on top of the 3D pass: the full-screen jumpscare image and
/// the F3 stats panel.
pub struct DebugOverlay {
    pub visible: bool,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    jumpscare_texture: egui::TextureHandle,
}

impl DebugOverlay {
    pub fn new(
        window: &winit::window::Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        jumpscare_image: &ImageAsset,
    ) -> Self {
        let egui_ctx = egui::Context::default();

        egui_ctx.style_mut(|style| {
            style.visuals.override_text_color = Some(egui::Color32::WHITE);
            style.override_font_id = Some(egui::FontId::monospace(13.0));
        });

        let jumpscare_texture = egui_ctx.load_texture(
            "jumpscare",
            egui::ColorImage::from_rgba_unmultiplied(
                [jumpscare_image.width as usize, jumpscare_image.height as usize],
                &jumpscare_image.rgba,
            ),
            egui::TextureOptions::LINEAR,
        );

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface_format,
            None,  // no depth
            1,     // msaa samples
            false, // no dithering
        );

        Self {
            visible: false,
            egui_ctx,
            egui_state,
            egui_renderer,
            jumpscare_texture,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn handle_window_event(
        &mut self,
        window: &winit::window::Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.egui_state.on_window_event(window, event)
    }

    /// Render one egui frame:
    ///
    /// - `show_jumpscare`: full-screen scare image over everything.
    /// - `stats`: F3 stats panel (`None` = hidden).
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &winit::window::Window,
        view: &wgpu::TextureView,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
        stats: Option<&DebugStats>,
        show_jumpscare: bool,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let jumpscare_id = self.jumpscare_texture.id();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            // ── Jumpscare: black backdrop + image, above everything ─────────
            if show_jumpscare {
                let painter = ctx.layer_painter(egui::LayerId::new(
                    egui::Order::Foreground,
                    egui::Id::new("jumpscare"),
                ));
                let screen = ctx.screen_rect();
                painter.rect_filled(screen, 0.0, egui::Color32::BLACK);
                painter.image(
                    jumpscare_id,
                    screen,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }

            // ── F3: stats panel ──────────────────────────────────────────────
            if let Some(stats) = stats {
                egui::Area::new(egui::Id::new("debug_overlay"))
                    .fixed_pos(egui::pos2(10.0, 10.0))
                    .show(ctx, |ui| {
                        egui::Frame::none()
                            .fill(egui::Color32::from_rgba_premultiplied(0, 0, 0, 180))
                            .inner_margin(egui::Margin::same(8.0))
                            .rounding(4.0)
                            .show(ui, |ui: &mut egui::Ui| {
                                for line in stats.lines() {
                                    ui.label(line);
                                }
                            });
                    });
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, &tris, screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer
                .render(&mut render_pass.forget_lifetime(), &tris, screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> DebugStats {
        DebugStats {
            fps: 60,
            frame_time_avg_ms: 16.6,
            frame_time_min_ms: 15.0,
            frame_time_max_ms: 18.0,
            entity_count: 21,
            resolution: (1280, 720),
            player_position: glam::Vec3::new(0.0, 1.0, 12.0),
            grounded: true,
            npc_phase: "Active",
            npc_position: glam::Vec3::new(-2.0, 0.0, 30.0),
            npc_visible: false,
            jumpscare_active: false,
            reset_in: None,
            resets: 3,
            segment_offsets: vec![60.0, -20.0, 0.0, 20.0, 40.0],
            sim_time: 4.25,
        }
    }

    #[test]
    fn panel_shows_resets_outside_a_jumpscare() {
        let lines = stats().lines();
        assert!(lines.contains(&"Resets: 3".to_string()));
        assert!(lines.contains(&"NPC: Active at (-2.0, 30.0)  hidden".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Segments: [60, -20, 0, 20, 40]"));
    }

    #[test]
    fn panel_counts_down_during_a_jumpscare() {
        let mut stats = stats();
        stats.jumpscare_active = true;
        stats.reset_in = Some(-0.01);
        assert!(stats.lines().contains(&"Jumpscare! reset in 0.00 s".to_string()));
    }
}
