//! Careers page. Positions are fixed copy; only the chrome is editable.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use super::PageChrome;
use crate::filters;
use crate::state::AppState;

/// Where applications are sent.
pub const APPLY_EMAIL: &str = "mohamad.abdelrahman@heritage-college.ca";
/// Recruiting phone line.
pub const APPLY_PHONE: &str = "01003323458";

/// An open position.
pub struct Job {
    pub title: &'static str,
    /// Icon name shown next to the title.
    pub icon: &'static str,
    pub location: &'static str,
    pub schedule: &'static str,
    pub summary: &'static str,
    pub responsibilities: &'static [&'static str],
    pub qualifications: &'static [&'static str],
    pub benefits: &'static [&'static str],
}

const LOCATION: &str = "Maadi, Egypt (In office)";
const SCHEDULE: &str = "Monday to Friday, Night Shift 7PM-4AM";

pub static JOBS: [Job; 4] = [
    Job {
        title: "International Sales Specialist (English Only)",
        icon: "briefcase",
        location: LOCATION,
        schedule: SCHEDULE,
        summary: "We are hiring an International Sales Specialist for our Client Heritage College Canada.",
        responsibilities: &[
            "Researching, prospecting, and establishing leads via direct phone contact, emails and text messages",
            "Presenting the opportunities of attending the College",
            "Qualify leads and develops progressive strategies to close new and existing business in a timely manner",
            "Collaborate with internal College departments on partner-related opportunities",
            "Accountable for achieving established sales targets/goals",
            "Administrative duties and support as required",
            "Providing sales and product information on programs and offerings",
            "Maintaining records to contribute to the administrative functions of the campus",
            "Achieving monthly and annual sales targets",
            "Driving the recruitment efforts pertaining to admissions in the school",
        ],
        qualifications: &[
            "Bachelor's degree in business or related field",
            "Excellent English communication skills verbal, written and listening",
            "A minimum of 3 years of Tele sales performance history",
            "Exceptional Technical skills with Microsoft office Suites",
            "Highly organized with attention to detail",
            "Professional and flexible attitude with a passion for helping others",
            "Ability to create and nurture relationships with customers through social selling",
            "Clear Criminal Background",
        ],
        benefits: &["Full-time", "Medical Insurance", "Door-to-door transportation"],
    },
    Job {
        title: "Learning Management System Administrator (Moodle)",
        icon: "settings",
        location: LOCATION,
        schedule: SCHEDULE,
        summary: "We are hiring a Moodle Distance Learning Coordinator for our Client Heritage College Canada.",
        responsibilities: &[
            "Deliver training materials via live facilitation, online facilitation, or distributed/distance learning",
            "Revise modes of assessment to measure the effectiveness of the course",
            "Evaluate and improve training programs and materials as required",
            "Create and integrate interactive elements into online and blended programs",
            "Provide support to the instructional design team",
            "Deliver training/orientation sessions to new/existing students about how to use the LMS system",
            "Ensure lectures, lessons, exams, and live sessions are updated in a timely manner on LMS (MOODLE)",
            "Design, develop, revise, and maintain existing training programs",
            "Recommend cost-effective training plans",
            "Maintain communication links at all levels through projects",
        ],
        qualifications: &[
            "Degree in Adult Education or related discipline; Master of Distance Learning highly Preferred",
            "1-2 years of training experience, including online course design",
            "Demonstrated knowledge of adult distance learning principles",
            "Proficient with Microsoft 365 applications, Video editing, recording",
            "Experience with Adobe InDesign and/or Photoshop an asset",
            "Experience in Moodle is required",
            "Exceptional English oral and written communication skills",
            "Organized and has a keen eye for details",
        ],
        benefits: &[
            "Full-time contract",
            "Competitive compensation",
            "Door-to-door transportation",
        ],
    },
    Job {
        title: "Education Assistant",
        icon: "graduation-cap",
        location: LOCATION,
        schedule: SCHEDULE,
        summary: "We are hiring an Education Assistant for our Client Heritage College Canada.",
        responsibilities: &[
            "Manage campus operations and provide support to the Academic Manager",
            "Assist in the implementation and planning of Individual Education Programs for students",
            "Maintain The LMS system with students' information and course contents",
            "Adhere to the college policies and ensure adherence by faculty and students",
            "Assist in the development of the future plans for new cohorts, programs, and courses",
            "Support faculty in their requests and assist them in course delivery",
            "Assist in handling students' complaints and address them in a timely manner",
            "Maintain the college inventory of equipment",
            "Attend all monthly instructor meetings and take minutes",
        ],
        qualifications: &[
            "Bachelor's Degree or equivalent required",
            "Excellent communication skills in English written and verbal",
            "Advanced experience in online learning and distance learning platforms (Moodle preferred)",
            "Excellent organizational ability/time management",
            "Strong technology interest and ability",
            "Evidence of innovation and creativity",
            "Previous one year education coordination experience is a must",
        ],
        benefits: &["Full-time", "Door-to-door transportation"],
    },
    Job {
        title: "Practicum Coordinator",
        icon: "users",
        location: LOCATION,
        schedule: SCHEDULE,
        summary: "We are hiring a Practicum Coordinator for our Client Heritage College Canada.",
        responsibilities: &[
            "Develop and maintain relationships with Canadian businesses to secure practicum opportunities",
            "Collaborate with academic staff to align practicum placements with curriculum requirements",
            "Match students with appropriate practicum placements based on their skills and career goals",
            "Monitor student progress during practicums and provide support as needed",
            "Ensure all practicum documentation and compliance requirements are met",
            "Offer one-on-one career counseling sessions to students and graduates",
            "Conduct workshops on resume writing, interview preparation, and job search strategies",
            "Build and maintain relationships with employers to identify job openings",
            "Assist in organizing virtual career fairs and networking events",
            "Track employment outcomes and provide reports on placement success rates",
        ],
        qualifications: &[
            "Bachelor's degree in Education, Business, Human Resources, or a related field",
            "Minimum of 3 years' experience in career services, recruitment, or a related area",
            "Strong understanding of the Canadian job market and employer expectations",
            "Excellent communication and interpersonal skills",
            "Proficient in using digital tools and platforms for remote coordination",
        ],
        benefits: &["Full-time", "Door-to-door transportation"],
    },
];

/// Careers page template.
#[derive(Template, WebTemplate)]
#[template(path = "careers.html")]
pub struct CareersTemplate {
    pub chrome: PageChrome,
    pub jobs: &'static [Job],
    pub apply_email: &'static str,
    pub apply_phone: &'static str,
}

/// Display the careers page.
#[instrument(skip(state))]
pub async fn careers(State(state): State<AppState>) -> CareersTemplate {
    CareersTemplate {
        chrome: PageChrome::load(state.content()).await,
        jobs: &JOBS,
        apply_email: APPLY_EMAIL,
        apply_phone: APPLY_PHONE,
    }
}
