// Job-description analysis and resume/job match scoring.

pub mod job_keywords;
pub mod scorer;
