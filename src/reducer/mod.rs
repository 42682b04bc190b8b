pub(crate) mod dataset;
pub(crate) mod params;
pub(crate) mod seam;
pub(crate) mod trajectory;
