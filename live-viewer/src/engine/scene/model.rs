use crate::engine::camera::ViewerCamera;
use crate::engine::camera::framing::{BoundingBox, Framing};
use crate::engine::camera::orbit_controls::OrbitControls;
use crate::engine::scene::overlay::{StatusOverlay, show_overlay};
use crate::sync::metadata::LoadMetadata;
use crate::sync::state::LoadTicket;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::scene::SceneInstanceReady;

/// The model currently attached to the scene. At most one exists at a time;
/// replacing it despawns the previous entity together with its scene
/// instance, which releases the last strong handles to its assets.
#[derive(Component, Debug, Clone)]
pub struct DisplayedModel {
    pub ticket: LoadTicket,
    pub metadata: LoadMetadata,
}

/// Set on a freshly attached model until the camera has been fitted to it.
#[derive(Component, Debug, Default)]
pub struct NeedsFraming;

/// The model's scene instance has been spawned into the world.
#[derive(Component, Debug, Default)]
pub struct SceneReady;

/// Observer: flag the displayed model once its scene instance exists.
pub fn mark_scene_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    models: Query<(), With<DisplayedModel>>,
) {
    let entity = trigger.target();
    if models.contains(entity) {
        commands.entity(entity).try_insert(SceneReady);
    }
}

/// Fit the camera to a newly displayed model and publish its load details.
///
/// Waits until every mesh under the model has computed bounds. A model with
/// no meshes keeps the current camera but still updates the overlay.
pub fn frame_displayed_model(
    mut commands: Commands,
    models: Query<(Entity, &DisplayedModel), (With<NeedsFraming>, With<SceneReady>)>,
    children: Query<&Children>,
    meshes: Query<(Option<&Aabb>, &GlobalTransform), With<Mesh3d>>,
    mut controls: ResMut<OrbitControls>,
    mut cameras: Query<&mut Transform, With<ViewerCamera>>,
    mut overlay: Query<(&mut Text, &mut Visibility), With<StatusOverlay>>,
) {
    for (entity, model) in &models {
        let mut bounds = BoundingBox::EMPTY;
        let mut bounds_pending = false;

        for descendant in children.iter_descendants(entity) {
            if let Ok((aabb, transform)) = meshes.get(descendant) {
                match aabb {
                    Some(aabb) => bounds.expand_to_aabb(aabb, transform),
                    None => bounds_pending = true,
                }
            }
        }

        if bounds_pending {
            continue;
        }

        match Framing::for_bounds(&bounds) {
            Some(framing) => {
                controls.look_from(framing.eye, framing.target);
                for mut camera_transform in &mut cameras {
                    *camera_transform = framing.camera_transform();
                }
                debug!(
                    "Framed {} at distance {:.2} around {:?}",
                    model.metadata.filename, framing.distance, framing.target
                );
            }
            None => warn!(
                "{} has no mesh geometry, keeping current camera",
                model.metadata.filename
            ),
        }

        for (mut text, mut visibility) in &mut overlay {
            show_overlay(&mut text, &mut visibility, &model.metadata);
        }

        commands.entity(entity).remove::<NeedsFraming>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::camera::{FRAMING_DIRECTION, FRAMING_MARGIN};
    use std::time::Duration;

    fn framing_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<OrbitControls>()
            .add_systems(Update, frame_displayed_model);
        app.world_mut()
            .spawn((ViewerCamera, Transform::from_xyz(0.0, 1.0, 5.0)));
        app.world_mut()
            .spawn((StatusOverlay, Text::new(""), Visibility::Hidden));
        app
    }

    fn spawn_model(app: &mut App, filename: &str) -> Entity {
        let mut metadata = LoadMetadata::new(filename, Some(4096));
        metadata.load_time = Duration::from_millis(250);
        app.world_mut()
            .spawn((
                DisplayedModel {
                    ticket: LoadTicket(1),
                    metadata,
                },
                NeedsFraming,
                SceneReady,
            ))
            .id()
    }

    fn spawn_mesh(app: &mut App, parent: Entity, aabb: Option<Aabb>, at: Vec3) -> Entity {
        let mut mesh = app.world_mut().spawn((
            Mesh3d(Handle::default()),
            GlobalTransform::from_translation(at),
            ChildOf(parent),
        ));
        if let Some(aabb) = aabb {
            mesh.insert(aabb);
        }
        mesh.id()
    }

    fn camera_translation(app: &mut App) -> Vec3 {
        let world = app.world_mut();
        world
            .query_filtered::<&Transform, With<ViewerCamera>>()
            .iter(world)
            .next()
            .expect("camera")
            .translation
    }

    fn overlay_state(app: &mut App) -> (String, Visibility) {
        let world = app.world_mut();
        world
            .query_filtered::<(&Text, &Visibility), With<StatusOverlay>>()
            .iter(world)
            .next()
            .map(|(text, visibility)| (text.0.clone(), *visibility))
            .expect("overlay")
    }

    #[test]
    fn frames_camera_on_model_bounds() {
        let mut app = framing_app();
        let model = spawn_model(&mut app, "bridge.glb");
        spawn_mesh(
            &mut app,
            model,
            Some(Aabb::from_min_max(Vec3::new(-2.0, 0.0, -1.0), Vec3::new(2.0, 1.0, 1.0))),
            Vec3::new(10.0, 0.0, 0.0),
        );

        app.update();

        let center = Vec3::new(10.0, 0.5, 0.0);
        let distance = FRAMING_MARGIN * 4.0;
        let expected_eye = center + FRAMING_DIRECTION * distance;

        assert!((camera_translation(&mut app) - expected_eye).length() < 1e-4);

        let controls = app.world().resource::<OrbitControls>();
        assert!((controls.target - center).length() < 1e-5);
        assert!((controls.eye() - expected_eye).length() < 1e-3);

        let (text, visibility) = overlay_state(&mut app);
        assert_eq!(text, "File: bridge.glb\nSize: 4.0 KB\nLoad Time: 0.25s");
        assert_eq!(visibility, Visibility::Visible);
        assert!(app.world().get::<NeedsFraming>(model).is_none());
    }

    #[test]
    fn waits_for_mesh_bounds() {
        let mut app = framing_app();
        let model = spawn_model(&mut app, "bridge.glb");
        let mesh = spawn_mesh(&mut app, model, None, Vec3::ZERO);

        app.update();
        assert!(app.world().get::<NeedsFraming>(model).is_some());
        assert_eq!(overlay_state(&mut app).1, Visibility::Hidden);

        app.world_mut()
            .entity_mut(mesh)
            .insert(Aabb::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0)));
        app.update();

        assert!(app.world().get::<NeedsFraming>(model).is_none());
        let expected_eye = FRAMING_DIRECTION * (FRAMING_MARGIN * 2.0);
        assert!((camera_translation(&mut app) - expected_eye).length() < 1e-4);
    }

    #[test]
    fn model_without_meshes_keeps_camera() {
        let mut app = framing_app();
        let model = spawn_model(&mut app, "empty.glb");

        app.update();

        assert_eq!(camera_translation(&mut app), Vec3::new(0.0, 1.0, 5.0));
        assert!(app.world().get::<NeedsFraming>(model).is_none());
        assert_eq!(overlay_state(&mut app).1, Visibility::Visible);
    }

    #[test]
    fn unready_scene_is_not_framed() {
        let mut app = framing_app();
        let model = spawn_model(&mut app, "bridge.glb");
        app.world_mut().entity_mut(model).remove::<SceneReady>();

        app.update();

        assert!(app.world().get::<NeedsFraming>(model).is_some());
        assert_eq!(overlay_state(&mut app).1, Visibility::Hidden);
    }
}
