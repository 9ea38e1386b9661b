use crate::data_model::mentor::Mentor;
use crate::data_model::student::Student;
use crate::error::StoreResult;
use crate::state::store::{parse_id, Store, MENTORS, STUDENTS};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::info;
use mongodb::bson::{doc, oid::ObjectId, Bson};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MentorDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    #[serde(default)]
    students: Vec<ObjectId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StudentDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    #[serde(default)]
    mentor: Option<ObjectId>,
}

impl From<MentorDoc> for Mentor {
    fn from(d: MentorDoc) -> Self {
        Mentor {
            id: d.id.to_hex(),
            name: d.name,
            students: d.students.iter().map(|s| s.to_hex()).collect(),
        }
    }
}

impl From<StudentDoc> for Student {
    fn from(d: StudentDoc) -> Self {
        Student {
            id: d.id.to_hex(),
            name: d.name,
            mentor: d.mentor.map(|m| m.to_hex()),
        }
    }
}

impl TryFrom<&Student> for StudentDoc {
    type Error = crate::error::StoreError;

    fn try_from(s: &Student) -> StoreResult<Self> {
        Ok(StudentDoc {
            id: parse_id(&s.id)?,
            name: s.name.clone(),
            mentor: s.mentor.as_deref().map(parse_id).transpose()?,
        })
    }
}

/// MongoDB backend.
#[derive(Debug, Clone)]
pub struct StoreMongo {
    client: Client,
    db: Database,
}

impl StoreMongo {
    pub async fn connect(url: &str, db_name: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(url).await?;
        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 }, None).await?;
        info!("Connected to database {}", db_name);
        Ok(Self { client, db })
    }

    fn mentors(&self) -> Collection<MentorDoc> {
        self.db.collection(MENTORS)
    }

    fn students(&self) -> Collection<StudentDoc> {
        self.db.collection(STUDENTS)
    }
}

#[async_trait]
impl Store for StoreMongo {
    async fn insert_mentor(&self, name: &str) -> StoreResult<Mentor> {
        let d = MentorDoc {
            id: ObjectId::new(),
            name: name.to_string(),
            students: Vec::new(),
        };
        self.mentors().insert_one(&d, None).await?;
        Ok(d.into())
    }

    async fn get_mentor(&self, id: &str) -> StoreResult<Option<Mentor>> {
        let oid = parse_id(id)?;
        let res = self.mentors().find_one(doc! { "_id": oid }, None).await?;
        Ok(res.map(Mentor::from))
    }

    async fn push_student(&self, mentor_id: &str, student_id: &str) -> StoreResult<bool> {
        let mentor = parse_id(mentor_id)?;
        let student = parse_id(student_id)?;
        let res = self
            .mentors()
            .update_one(
                doc! { "_id": mentor },
                doc! { "$push": { "students": student } },
                None,
            )
            .await?;
        Ok(res.matched_count > 0)
    }

    async fn pull_student(&self, mentor_id: &str, student_id: &str) -> StoreResult<bool> {
        let mentor = parse_id(mentor_id)?;
        let student = parse_id(student_id)?;
        let res = self
            .mentors()
            .update_one(
                doc! { "_id": mentor },
                doc! { "$pull": { "students": student } },
                None,
            )
            .await?;
        Ok(res.modified_count > 0)
    }

    async fn insert_student(&self, name: &str) -> StoreResult<Student> {
        let d = StudentDoc {
            id: ObjectId::new(),
            name: name.to_string(),
            mentor: None,
        };
        self.students().insert_one(&d, None).await?;
        Ok(d.into())
    }

    async fn get_student(&self, id: &str) -> StoreResult<Option<Student>> {
        let oid = parse_id(id)?;
        let res = self.students().find_one(doc! { "_id": oid }, None).await?;
        Ok(res.map(Student::from))
    }

    async fn set_student(&self, student: &Student) -> StoreResult<()> {
        let d = StudentDoc::try_from(student)?;
        self.students()
            .replace_one(doc! { "_id": d.id }, &d, None)
            .await?;
        Ok(())
    }

    async fn find_students(&self, mentor: Option<&str>) -> StoreResult<Vec<Student>> {
        // `null` also matches documents where the field is missing
        let filter = match mentor {
            Some(m) => {
                let oid = parse_id(m)?;
                doc! { "mentor": oid }
            }
            None => doc! { "mentor": Bson::Null },
        };
        let cursor = self.students().find(filter, None).await?;
        let docs: Vec<StudentDoc> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Student::from).collect())
    }

    async fn disconnect(&self) {
        self.client.clone().shutdown().await;
        info!("Disconnected from database");
    }
}
