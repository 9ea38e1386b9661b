/*
 * Mentorship project
 *
 * Permission is hereby granted, free of charge, to any person obtaining
 * a copy of this software and associated documentation files (the “Software”),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included
 * in all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS
 * OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
use crate::data_model::mentor::Mentor;
use crate::data_model::student::Student;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

pub const MENTORS: &str = "mentors";
pub const STUDENTS: &str = "students";

/// Document storage for both collections.
///
/// Lookups return `Ok(None)` for a well-formed id that matches nothing and
/// `Err(StoreError::InvalidId)` for an id that cannot be a document id.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_mentor(&self, name: &str) -> StoreResult<Mentor>;
    async fn get_mentor(&self, id: &str) -> StoreResult<Option<Mentor>>;
    /// Appends `student_id` to the mentor's list in one atomic update.
    /// Returns `false` if the mentor does not exist.
    async fn push_student(&self, mentor_id: &str, student_id: &str) -> StoreResult<bool>;
    /// Removes every occurrence of `student_id` in one atomic update.
    /// Returns `true` if anything was removed.
    async fn pull_student(&self, mentor_id: &str, student_id: &str) -> StoreResult<bool>;

    async fn insert_student(&self, name: &str) -> StoreResult<Student>;
    async fn get_student(&self, id: &str) -> StoreResult<Option<Student>>;
    async fn set_student(&self, student: &Student) -> StoreResult<()>;

    /// Students whose mentor equals `mentor`; `None` selects unassigned ones.
    async fn find_students(&self, mentor: Option<&str>) -> StoreResult<Vec<Student>>;

    async fn disconnect(&self);
}

pub fn new_id() -> String {
    ObjectId::new().to_hex()
}

pub fn parse_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}
