pub mod strava;
