//! Procedural primitive meshes
//!
//! All primitives fill the `[-1, 1]` cube so node `model_scale` values read as
//! half extents.

use std::f32::consts::{PI, TAU};

use scene_engine::foundation::math::Vec3;
use scene_engine::scene::{MeshDescriptor, MeshRef, SceneResult};

/// Axis-aligned cube with flat faces
pub fn cube() -> SceneResult<MeshRef> {
    let faces = [Vec3::x(), -Vec3::x(), Vec3::y(), -Vec3::y(), Vec3::z(), -Vec3::z()];
    let mut vertices = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut triangles = Vec::with_capacity(36);

    for normal in faces {
        // Two axes spanning the face, oriented so (u x v) == normal
        let u = if normal.x.abs() > 0.5 { Vec3::y() } else { Vec3::x() };
        let v = normal.cross(&u);
        let base = vertices.len() as u32;

        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            vertices.push(normal + u * su + v * sv);
            normals.push(normal);
        }
        triangles.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshDescriptor::named("Cube", vertices, normals, triangles)
}

/// Square-based pyramid, apex up
pub fn pyramid() -> SceneResult<MeshRef> {
    let apex = Vec3::new(0.0, 1.0, 0.0);
    let corners = [
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
    ];
    let mut vertices = Vec::with_capacity(16);
    let mut normals = Vec::with_capacity(16);
    let mut triangles = Vec::with_capacity(18);

    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let normal = (apex - a).cross(&(b - a)).normalize();
        let base = vertices.len() as u32;
        vertices.extend([a, apex, b]);
        normals.extend([normal; 3]);
        triangles.extend([base, base + 1, base + 2]);
    }

    let base = vertices.len() as u32;
    vertices.extend(corners);
    normals.extend([-Vec3::y(); 4]);
    triangles.extend([base, base + 1, base + 2, base, base + 2, base + 3]);

    MeshDescriptor::named("Pyramid", vertices, normals, triangles)
}

/// Cylinder along Y with capped ends
pub fn cylinder(segments: u32) -> SceneResult<MeshRef> {
    let segments = segments.max(3);
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut triangles = Vec::new();

    // Side: one bottom/top vertex pair per segment
    for i in 0..segments {
        let angle = TAU * i as f32 / segments as f32;
        let radial = Vec3::new(angle.cos(), 0.0, angle.sin());
        vertices.extend([radial - Vec3::y(), radial + Vec3::y()]);
        normals.extend([radial; 2]);
    }
    for i in 0..segments {
        let (b0, t0) = (2 * i, 2 * i + 1);
        let (b1, t1) = (2 * ((i + 1) % segments), 2 * ((i + 1) % segments) + 1);
        triangles.extend([b0, t0, t1, b0, t1, b1]);
    }

    // Caps: a center vertex plus a ring with the cap normal
    for (y, normal) in [(1.0, Vec3::y()), (-1.0, -Vec3::y())] {
        let center = vertices.len() as u32;
        vertices.push(Vec3::new(0.0, y, 0.0));
        normals.push(normal);
        for i in 0..segments {
            let angle = TAU * i as f32 / segments as f32;
            vertices.push(Vec3::new(angle.cos(), y, angle.sin()));
            normals.push(normal);
        }
        for i in 0..segments {
            let a = center + 1 + i;
            let b = center + 1 + (i + 1) % segments;
            if y > 0.0 {
                triangles.extend([center, b, a]);
            } else {
                triangles.extend([center, a, b]);
            }
        }
    }

    MeshDescriptor::named("Cylinder", vertices, normals, triangles)
}

/// UV sphere
pub fn sphere(stacks: u32, slices: u32) -> SceneResult<MeshRef> {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let mut vertices = Vec::new();

    for stack in 0..=stacks {
        let polar = PI * stack as f32 / stacks as f32;
        for slice in 0..=slices {
            let azimuth = TAU * slice as f32 / slices as f32;
            vertices.push(Vec3::new(
                polar.sin() * azimuth.cos(),
                polar.cos(),
                polar.sin() * azimuth.sin(),
            ));
        }
    }

    let row = slices + 1;
    let mut triangles = Vec::new();
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = stack * row + slice;
            let b = a + row;
            triangles.extend([a, a + 1, b, a + 1, b + 1, b]);
        }
    }

    // Unit sphere: positions double as normals
    let normals = vertices.clone();
    MeshDescriptor::named("Sphere", vertices, normals, triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_are_valid() {
        let meshes = [cube(), pyramid(), cylinder(16), sphere(8, 12)];
        for mesh in meshes {
            let mesh = mesh.unwrap();
            assert!(mesh.triangle_count() > 0);
            assert!(mesh.vertices().iter().all(|v| v.amax() <= 1.0 + 1e-5));
        }
    }

    #[test]
    fn test_cube_normals_face_outward() {
        let cube = cube().unwrap();
        assert_eq!(cube.vertex_count(), 24);
        for (v, n) in cube.vertices().iter().zip(cube.normals()) {
            assert!(v.dot(n) > 0.0);
        }
    }

    #[test]
    fn test_degenerate_counts_are_raised() {
        assert_eq!(cylinder(1).unwrap().vertex_count(), cylinder(3).unwrap().vertex_count());
    }
}
