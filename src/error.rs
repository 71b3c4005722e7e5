use thiserror::Error;

pub type Result<T> = std::result::Result<T, PunchError>;

#[derive(Error, Debug)]
pub enum PunchError {
    #[error("Not a git repository: {0}")]
    NotARepository(String),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Cannot encode an image with no rows")]
    EmptyImage,
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::object::find::existing::Error> for PunchError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        PunchError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for PunchError {
    fn from(err: gix::object::commit::Error) -> Self {
        PunchError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for PunchError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        PunchError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for PunchError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        PunchError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for PunchError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        PunchError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for PunchError {
    fn from(err: gix::objs::decode::Error) -> Self {
        PunchError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::discover::Error> for PunchError {
    fn from(err: gix::discover::Error) -> Self {
        PunchError::GitDiscover(Box::new(err))
    }
}
