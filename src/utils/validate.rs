use once_cell::sync::Lazy;
use regex::Regex;

static SUBMISSION_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9][A-Za-z0-9.-]*(:\d+)?(/\S*)?$").expect("Invalid URL regex")
});

/// 校验提交链接：必须是格式合法的 http/https URL
pub fn validate_submission_url(url: &str) -> Result<(), &'static str> {
    if url.len() > 2048 {
        return Err("Submission URL is too long");
    }
    if !SUBMISSION_URL_RE.is_match(url) {
        return Err("Submission URL must be a well-formed http(s) URL");
    }
    Ok(())
}

/// 校验作业满分：必须是非负的有限数
pub fn validate_max_points(max_points: f64) -> Result<(), &'static str> {
    if !max_points.is_finite() {
        return Err("max_points must be a finite number");
    }
    if max_points < 0.0 {
        return Err("max_points must be non-negative");
    }
    Ok(())
}

/// 校验评分：必须落在 [0, max_points] 区间内
pub fn validate_grade(grade: f64, max_points: f64) -> Result<(), String> {
    if !grade.is_finite() {
        return Err("grade must be a finite number".to_string());
    }
    if grade < 0.0 || grade > max_points {
        return Err(format!("grade must be within [0, {max_points}]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submission_urls() {
        assert!(validate_submission_url("https://drive.example/x").is_ok());
        assert!(validate_submission_url("http://github.com/user/repo").is_ok());
        assert!(validate_submission_url("https://host:8443/path?query=1").is_ok());
    }

    #[test]
    fn test_invalid_submission_urls() {
        assert!(validate_submission_url("ftp://host/file").is_err());
        assert!(validate_submission_url("not a url").is_err());
        assert!(validate_submission_url("https://").is_err());
        assert!(validate_submission_url("").is_err());
    }

    #[test]
    fn test_max_points_bounds() {
        assert!(validate_max_points(0.0).is_ok());
        assert!(validate_max_points(100.0).is_ok());
        assert!(validate_max_points(-1.0).is_err());
        assert!(validate_max_points(f64::NAN).is_err());
    }

    #[test]
    fn test_grade_range() {
        assert!(validate_grade(0.0, 100.0).is_ok());
        assert!(validate_grade(100.0, 100.0).is_ok());
        assert!(validate_grade(100.5, 100.0).is_err());
        assert!(validate_grade(-0.5, 100.0).is_err());
        assert!(validate_grade(f64::NAN, 100.0).is_err());
    }
}
