use crate::data_model::mentor::Mentor;
use crate::data_model::student::Student;
use crate::error::{StoreError, StoreResult};
use crate::state::store::{new_id, parse_id, Store, MENTORS, STUDENTS};
use async_trait::async_trait;
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Collections {
    mentors: BTreeMap<String, Mentor>,
    students: BTreeMap<String, Student>,
}

/// In-process backend.
///
/// Documents live in memory. With a data path every write is mirrored to
/// `<path>/collection/<name>/<id>/data.js` and the tree is read back by
/// [`StoreLocal::connect`].
#[derive(Debug)]
pub struct StoreLocal {
    path: Option<PathBuf>,
    data: Mutex<Collections>,
}

impl StoreLocal {
    pub fn new() -> Self {
        Self {
            path: None,
            data: Mutex::new(Collections::default()),
        }
    }

    pub fn connect(path: &str) -> StoreResult<Self> {
        if path.is_empty() {
            info!("Using in-memory store");
            return Ok(Self::new());
        }

        let root = PathBuf::from(path);
        let mut data = Collections::default();
        for name in [MENTORS, STUDENTS] {
            fs::create_dir_all(root.join("collection").join(name))?;
        }
        data.mentors = read_collection(&root, MENTORS)?;
        data.students = read_collection(&root, STUDENTS)?;
        info!(
            "Loaded {} mentors and {} students from {}",
            data.mentors.len(),
            data.students.len(),
            path
        );

        Ok(Self {
            path: Some(root),
            data: Mutex::new(data),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Collections>> {
        self.data.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Mirrors one document to disk. Callers hold the collections lock so
    /// the file and the map see writes in the same order.
    fn write_doc<T: Serialize>(&self, collection: &str, id: &str, doc: &T) -> StoreResult<()> {
        let Some(root) = &self.path else {
            return Ok(());
        };
        let dir = root.join("collection").join(collection).join(id);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("data.js"), serde_json::to_string(doc)?)?;
        Ok(())
    }
}

/// Map key for `id`: ids are matched case-insensitively, like ObjectIds.
fn key(id: &str) -> StoreResult<String> {
    Ok(parse_id(id)?.to_hex())
}

impl Default for StoreLocal {
    fn default() -> Self {
        Self::new()
    }
}

fn read_collection<T: DeserializeOwned>(root: &Path, name: &str) -> StoreResult<BTreeMap<String, T>> {
    let mut map = BTreeMap::new();
    for entry in fs::read_dir(root.join("collection").join(name))? {
        let entry = entry?;
        let data_path = entry.path().join("data.js");
        if !data_path.is_file() {
            continue;
        }
        let id = entry.file_name().to_string_lossy().to_string();
        if parse_id(&id).is_err() {
            error!("Skipping {}/{}: not a document id", name, id);
            continue;
        }
        let text = fs::read_to_string(&data_path)?;
        map.insert(id, serde_json::from_str(&text)?);
    }
    Ok(map)
}

#[async_trait]
impl Store for StoreLocal {
    async fn insert_mentor(&self, name: &str) -> StoreResult<Mentor> {
        let mentor = Mentor::new(&new_id(), name);
        let mut data = self.lock()?;
        self.write_doc(MENTORS, &mentor.id, &mentor)?;
        data.mentors.insert(mentor.id.clone(), mentor.clone());
        Ok(mentor)
    }

    async fn get_mentor(&self, id: &str) -> StoreResult<Option<Mentor>> {
        let id = key(id)?;
        Ok(self.lock()?.mentors.get(&id).cloned())
    }

    async fn push_student(&self, mentor_id: &str, student_id: &str) -> StoreResult<bool> {
        let (mentor_id, student_id) = (key(mentor_id)?, key(student_id)?);
        let mut data = self.lock()?;
        let Some(mentor) = data.mentors.get(&mentor_id) else {
            return Ok(false);
        };
        let mut updated = mentor.clone();
        updated.students.push(student_id);
        self.write_doc(MENTORS, &mentor_id, &updated)?;
        data.mentors.insert(mentor_id, updated);
        Ok(true)
    }

    async fn pull_student(&self, mentor_id: &str, student_id: &str) -> StoreResult<bool> {
        let (mentor_id, student_id) = (key(mentor_id)?, key(student_id)?);
        let mut data = self.lock()?;
        let Some(mentor) = data.mentors.get(&mentor_id) else {
            return Ok(false);
        };
        if !mentor.has_student(&student_id) {
            return Ok(false);
        }
        let mut updated = mentor.clone();
        updated.remove_student(&student_id);
        self.write_doc(MENTORS, &mentor_id, &updated)?;
        data.mentors.insert(mentor_id, updated);
        Ok(true)
    }

    async fn insert_student(&self, name: &str) -> StoreResult<Student> {
        let student = Student::new(&new_id(), name);
        let mut data = self.lock()?;
        self.write_doc(STUDENTS, &student.id, &student)?;
        data.students.insert(student.id.clone(), student.clone());
        Ok(student)
    }

    async fn get_student(&self, id: &str) -> StoreResult<Option<Student>> {
        let id = key(id)?;
        Ok(self.lock()?.students.get(&id).cloned())
    }

    async fn set_student(&self, student: &Student) -> StoreResult<()> {
        let mut student = student.clone();
        student.id = key(&student.id)?;
        student.mentor = student.mentor.as_deref().map(key).transpose()?;
        let mut data = self.lock()?;
        self.write_doc(STUDENTS, &student.id, &student)?;
        data.students.insert(student.id.clone(), student);
        Ok(())
    }

    async fn find_students(&self, mentor: Option<&str>) -> StoreResult<Vec<Student>> {
        let mentor = mentor.map(key).transpose()?;
        Ok(self
            .lock()?
            .students
            .values()
            .filter(|s| match &mentor {
                Some(m) => s.mentor.as_ref() == Some(m),
                None => !s.is_assigned(),
            })
            .cloned()
            .collect())
    }

    async fn disconnect(&self) {
        info!("Closing local store");
    }
}
