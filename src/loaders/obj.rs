use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::geometry::MeshData;
use crate::types::MeshVertex;

/// A parsed OBJ file, all of its objects merged into one mesh
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub path: PathBuf,
    pub mesh: MeshData,
    /// Number of `o`/`g` objects merged into `mesh`
    pub object_count: usize,
    /// True when the file carried no `vn` data and normals were generated
    pub generated_normals: bool,
}

/// Loads an OBJ file, triangulated and with one index per vertex
pub fn load_obj_file(path: impl AsRef<Path>) -> Result<LoadedModel> {
    let path = path.as_ref();
    log::info!("Loading OBJ file: {:?}", path);

    let options = tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    };

    let (models, materials) = tobj::load_obj(path, &options)
        .with_context(|| format!("Failed to load OBJ file: {:?}", path))?;

    // Materials are replaced by the viewer's own, so a missing .mtl is harmless
    if let Err(e) = materials {
        log::debug!("Ignoring OBJ materials for {:?}: {}", path, e);
    }

    let object_count = models.len();
    let mut mesh = MeshData::default();
    let mut generated_normals = false;

    for model in models {
        log::debug!(
            "  Object {:?}: {} positions, {} indices",
            model.name,
            model.mesh.positions.len() / 3,
            model.mesh.indices.len()
        );
        let (part, generated) = convert_mesh(&model.mesh)
            .with_context(|| format!("Invalid geometry in object {:?}", model.name))?;
        generated_normals |= generated;
        mesh.append(part);
    }

    if mesh.is_empty() {
        bail!("OBJ file {:?} contains no triangles", path);
    }

    log::info!(
        "OBJ loaded: {} objects, {} vertices, {} triangles",
        object_count,
        mesh.vertices.len(),
        mesh.triangle_count()
    );

    Ok(LoadedModel {
        path: path.to_path_buf(),
        mesh,
        object_count,
        generated_normals,
    })
}

/// Converts one tobj mesh; returns whether normals had to be generated
fn convert_mesh(src: &tobj::Mesh) -> Result<(MeshData, bool)> {
    let vertex_count = src.positions.len() / 3;
    if let Some(&bad) = src.indices.iter().find(|&&i| i as usize >= vertex_count) {
        bail!("index {} out of range for {} vertices", bad, vertex_count);
    }

    let has_normals = src.normals.len() == src.positions.len();
    let vertices = src
        .positions
        .chunks_exact(3)
        .enumerate()
        .map(|(i, p)| {
            let normal = if has_normals {
                [src.normals[i * 3], src.normals[i * 3 + 1], src.normals[i * 3 + 2]]
            } else {
                [0.0; 3]
            };
            MeshVertex::new([p[0], p[1], p[2]], normal)
        })
        .collect();

    let mut mesh = MeshData::new(vertices, src.indices.clone());
    if !has_normals {
        mesh.recompute_normals();
    }
    Ok((mesh, !has_normals))
}

/// In-flight background load of a model file
///
/// The worker thread only parses; GPU upload stays on the event loop thread.
pub struct ModelLoad {
    path: PathBuf,
    receiver: Option<Receiver<Result<LoadedModel>>>,
}

/// Outcome of polling a [`ModelLoad`]
pub enum LoadStatus {
    Pending,
    Ready(Result<LoadedModel>),
    /// The result was already taken by an earlier poll
    Finished,
}

impl ModelLoad {
    /// Start loading `path` on a worker thread
    pub fn spawn(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let (sender, receiver) = mpsc::channel();
        let worker_path = path.clone();

        thread::Builder::new()
            .name("obj-loader".to_string())
            .spawn(move || {
                sender.send(load_obj_file(&worker_path)).ok();
            })
            .context("Failed to spawn model loader thread")?;

        Ok(Self {
            path,
            receiver: Some(receiver),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-blocking check for the load result
    pub fn poll(&mut self) -> LoadStatus {
        let Some(receiver) = &self.receiver else {
            return LoadStatus::Finished;
        };

        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                LoadStatus::Ready(result)
            }
            Err(TryRecvError::Empty) => LoadStatus::Pending,
            Err(TryRecvError::Disconnected) => {
                self.receiver = None;
                LoadStatus::Ready(Err(anyhow::anyhow!(
                    "Model loader for {:?} exited without a result",
                    self.path
                )))
            }
        }
    }

    /// Block until the load finishes
    pub fn wait(mut self) -> Result<LoadedModel> {
        match self.receiver.take() {
            Some(receiver) => receiver
                .recv()
                .context("Model loader exited without a result")?,
            None => bail!("Model load for {:?} was already consumed", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tobj_mesh(positions: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> tobj::Mesh {
        tobj::Mesh {
            positions,
            normals,
            indices,
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_mesh_generates_missing_normals() {
        let src = tobj_mesh(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![],
            vec![0, 1, 2],
        );
        let (mesh, generated) = convert_mesh(&src).unwrap();
        assert!(generated);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_convert_mesh_keeps_file_normals() {
        let src = tobj_mesh(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        );
        let (mesh, generated) = convert_mesh(&src).unwrap();
        assert!(!generated);
        assert_eq!(mesh.vertices[1].normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_convert_mesh_rejects_out_of_range_index() {
        let src = tobj_mesh(vec![0.0, 0.0, 0.0], vec![], vec![0, 0, 5]);
        assert!(convert_mesh(&src).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = load_obj_file("definitely/not/here.obj");
        assert!(result.is_err());
    }
}
