//! Typed portal payloads
//!
//! Field names here are the client's; serde renames map them onto the
//! backend's Vietnamese wire keys, with aliases for the casing variants
//! different endpoints emit for the same column. Dates stay as wire
//! strings: the backend mixes DATE and DATETIME columns and the client
//! never computes with them.

use crate::status::{ApplicationStatus, InterviewStatus};
use serde::{Deserialize, Serialize};

/// One job posting as listed and displayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(rename = "tinID", alias = "TinID", alias = "id")]
    pub id: i64,
    #[serde(rename = "tieuDe", alias = "TieuDe")]
    pub title: String,
    #[serde(rename = "moTa", alias = "MoTa", default)]
    pub description: String,
    #[serde(rename = "yeuCau", alias = "YeuCau", default)]
    pub requirements: String,
    #[serde(rename = "diaDiem", alias = "DiaDiem", default)]
    pub location: String,
    #[serde(rename = "loaiHinh", alias = "LoaiHinh", default)]
    pub employment_type: String,
    #[serde(rename = "mucLuong", alias = "MucLuong", default)]
    pub salary: String,
    #[serde(rename = "hanNop", alias = "HanNop", default)]
    pub deadline: String,
    #[serde(rename = "congTy", alias = "CongTy", default)]
    pub company: String,
    #[serde(rename = "logoURL", alias = "LogoURL", default)]
    pub logo_url: Option<String>,
    #[serde(rename = "ngayDang", alias = "NgayDang", default)]
    pub posted_at: String,
}

/// Fields an employer submits when creating or editing a posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    #[serde(rename = "tieuDe")]
    pub title: String,
    #[serde(rename = "moTa", default)]
    pub description: String,
    #[serde(rename = "yeuCau", default)]
    pub requirements: String,
    #[serde(rename = "diaDiem", default)]
    pub location: String,
    #[serde(rename = "loaiHinh", default)]
    pub employment_type: String,
    #[serde(rename = "mucLuong", default)]
    pub salary: String,
    #[serde(rename = "hanNop", default)]
    pub deadline: String,
    #[serde(rename = "ntdID", alias = "NTDID")]
    pub employer_id: i64,
}

/// Paged `GET /jobs` envelope: `{page, size, items, count}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPage {
    pub page: u32,
    pub size: u32,
    pub items: Vec<JobPosting>,
    pub count: u32,
}

/// Search parameters for `GET /jobs`
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Application history row as the candidate sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateApplication {
    #[serde(rename = "ungTuyenID", alias = "UngTuyenID")]
    pub id: i64,
    #[serde(rename = "tinID", alias = "TinID")]
    pub job_id: i64,
    #[serde(rename = "tieuDe", alias = "TieuDe", default)]
    pub job_title: String,
    #[serde(rename = "congTy", alias = "CongTy", default)]
    pub company: String,
    // Some rows carry no status at all; "Đang xem xét" is the implied one
    #[serde(rename = "trangThai", alias = "TrangThai", default)]
    pub status: ApplicationStatus,
    #[serde(rename = "ngayNop", alias = "NgayNop", default)]
    pub submitted_at: String,
    #[serde(rename = "ghiChu", alias = "GhiChu", default)]
    pub note: Option<String>,
}

/// Applicant row as the employer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerApplication {
    #[serde(rename = "ungTuyenID", alias = "UngTuyenID")]
    pub id: i64,
    #[serde(rename = "ungVienID", alias = "UngVienID")]
    pub candidate_id: i64,
    #[serde(rename = "hoTen", alias = "HoTen", default)]
    pub candidate_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "cvLink", alias = "CVLink", default)]
    pub cv_link: Option<String>,
    #[serde(rename = "trangThai", alias = "TrangThai", default)]
    pub status: ApplicationStatus,
    #[serde(rename = "ngayUngTuyen", alias = "NgayUngTuyen", default)]
    pub applied_at: String,
    #[serde(rename = "ghiChu", alias = "GhiChu", default)]
    pub note: Option<String>,
}

/// Interview invitation sent to a candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    #[serde(rename = "lichHenID", alias = "LichHenID")]
    pub id: i64,
    #[serde(rename = "ungTuyenID", alias = "UngTuyenID")]
    pub application_id: i64,
    #[serde(rename = "ngayHen", alias = "NgayHen", default)]
    pub scheduled_at: String,
    #[serde(rename = "diaDiem", alias = "DiaDiem", default)]
    pub location: String,
    #[serde(rename = "nguoiPhongVan", alias = "NguoiPhongVan", default)]
    pub interviewer: String,
    #[serde(rename = "noiDungThu", alias = "NoiDungThu", default)]
    pub message: String,
    #[serde(rename = "trangThai", alias = "TrangThai")]
    pub status: InterviewStatus,
    #[serde(rename = "ngayGuiThu", alias = "NgayGuiThu", default)]
    pub sent_at: String,
    #[serde(rename = "emailUngVien", alias = "EmailUngVien", default)]
    pub candidate_email: String,
}

/// Employer (NTD) company record.
///
/// The id column surfaces as `NTDID`, `ntdID` or `id` depending on which
/// endpoint serialized the row; all three land on `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerProfile {
    #[serde(rename = "ntdID", alias = "NTDID", alias = "id")]
    pub id: i64,
    #[serde(rename = "tenCongTy", alias = "TenCongTy", default)]
    pub company_name: String,
    #[serde(rename = "diaChi", alias = "DiaChi", default)]
    pub address: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(rename = "moTa", alias = "MoTa", default)]
    pub description: Option<String>,
    #[serde(rename = "logoURL", alias = "LogoURL", default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "soDienThoai", alias = "SoDienThoai", default)]
    pub phone: String,
}

/// Per-user notification row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "notiID", alias = "NotiID")]
    pub id: i64,
    #[serde(rename = "userID", alias = "UserID", alias = "userId")]
    pub user_id: i64,
    #[serde(rename = "tieuDe", alias = "TieuDe", default)]
    pub title: String,
    #[serde(rename = "noiDung", alias = "NoiDung", default)]
    pub body: String,
    #[serde(rename = "daDoc", alias = "DaDoc", alias = "isRead", default)]
    pub read: bool,
    #[serde(rename = "ngayTao", alias = "NgayTao", default)]
    pub created_at: String,
}

/// Candidate's own profile record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(rename = "ungVienID", alias = "UngVienID")]
    pub id: i64,
    #[serde(rename = "userId", alias = "UserID", alias = "userID")]
    pub user_id: i64,
    #[serde(rename = "hoTen", alias = "HoTen", alias = "FullName", default)]
    pub full_name: String,
    #[serde(rename = "email", alias = "Email", default)]
    pub email: String,
    #[serde(rename = "soDienThoai", alias = "SoDienThoai", alias = "Phone", default)]
    pub phone: String,
    #[serde(rename = "diaChi", alias = "DiaChi", default)]
    pub address: String,
    #[serde(rename = "ngaySinh", alias = "NgaySinh", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "gioiTinh", alias = "GioiTinh", default)]
    pub gender: Option<String>,
    #[serde(rename = "hocVan", alias = "HocVan", default)]
    pub education: String,
    #[serde(rename = "kyNang", alias = "KyNang", default)]
    pub skills: String,
    #[serde(rename = "kinhNghiem", alias = "KinhNghiem", default)]
    pub experience: String,
    #[serde(rename = "moTaBanThan", alias = "MoTaBanThan", default)]
    pub bio: String,
    #[serde(rename = "cvLink", alias = "CVLink", default)]
    pub cv_link: Option<String>,
}

/// Create/update body for an employer record. Used both by the admin
/// account-management screen and by an employer editing its own company
/// page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerDraft {
    #[serde(rename = "tenCongTy")]
    pub company_name: String,
    #[serde(rename = "diaChi", default)]
    pub address: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(rename = "moTa", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "soDienThoai", default)]
    pub phone: String,
}

/// Create/update body for a candidate profile. The backend keys the row
/// by `ungVienID` but the write body carries the owning `userId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfileDraft {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "hoTen")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "soDienThoai", default)]
    pub phone: String,
    #[serde(rename = "diaChi", default)]
    pub address: String,
    #[serde(rename = "ngaySinh", default)]
    pub birth_date: String,
    #[serde(rename = "gioiTinh", default)]
    pub gender: String,
    #[serde(rename = "hocVan", default)]
    pub education: String,
    #[serde(rename = "kyNang", default)]
    pub skills: String,
    #[serde(rename = "kinhNghiem", default)]
    pub experience: String,
    #[serde(rename = "moTaBanThan", default)]
    pub bio: String,
}

/// Dashboard numbers for one employer: an aggregate block plus a
/// per-month application series for the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerStats {
    #[serde(default)]
    pub overview: StatsOverview,
    #[serde(default)]
    pub monthly: Vec<MonthlyApplications>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsOverview {
    #[serde(rename = "totalJobs", alias = "TotalJobs", default)]
    pub total_jobs: i64,
    #[serde(rename = "totalApplicants", alias = "TotalApplicants", default)]
    pub total_applicants: i64,
    #[serde(rename = "successApplicants", alias = "SuccessApplicants", default)]
    pub success_applicants: i64,
    #[serde(rename = "successRate", alias = "SuccessRate", default)]
    pub success_rate: f64,
}

/// One month of the applications chart. The aggregate query labels the
/// columns `Thang`/`SoLuong`; month stays the `yyyy-MM` string it arrives
/// as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyApplications {
    #[serde(rename = "month", alias = "Thang", alias = "thang")]
    pub month: String,
    #[serde(rename = "applications", alias = "SoLuong", alias = "soLuong", default)]
    pub applications: i64,
}
