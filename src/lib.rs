/*!
# Calculators

A small browser-based calculator site with user accounts, built in Rust.

## Overview

Five independent calculators sit behind an optional login. Every calculation is
a direct closed-form computation on the submitted form; nothing about a
calculation is stored. The only persistent data is the table of registered users.

## Architecture

### Calculators (`calc`)
- **trig** - sin, cos, tan and their reciprocals in degrees or radians, with
  huge results saturated to infinity
- **logarithm** - logarithm in any valid base, natural logarithm
- **divisors** - HCF/GCD and LCM of a list of positive integers
- **quadratic** - real roots of `a·x² + b·x + c = 0`, flagging complex roots
- **stats** - mean, median, mean deviations, variance, standard deviation,
  range and coefficient of variation

### Accounts
- **store** - SQLite `users` table (username, optional email, Argon2 hash)
- **login** - registration, login, logout and the signed session cookie

### Web layer
- **app** - axum router, shared state and the calculator form handlers
- **views** - handlebars templates compiled into the binary
- **config** - settings from the environment

## Routes

- `/` - Home page
- `/login`, `/register`, `/logout` - Account management
- `/trigo`, `/logln`, `/hcflcm`, `/qe`, `/stats` - Calculator forms (GET) and results (POST)
- `/static/...` - Stylesheet
*/

pub mod calc;
pub mod error;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod config;
#[cfg(feature = "web")]
pub mod login;
#[cfg(feature = "web")]
pub mod store;
#[cfg(feature = "web")]
pub mod views;

pub use error::CalcError;
