use crate::math::lerp;

/// A complete joint-name → angle assignment, kept in chain order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JointPose {
    joints: Vec<(String, f32)>,
}

impl JointPose {
    /// Pairs names with angles in order; extra entries on either side are dropped.
    pub fn new(names: Vec<String>, angles: Vec<f32>) -> Self {
        names.into_iter().zip(angles).collect()
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.joints
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, angle)| angle)
    }

    pub fn angles(&self) -> Vec<f32> {
        self.joints.iter().map(|&(_, angle)| angle).collect()
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.joints.iter().map(|(name, angle)| (name.as_str(), *angle))
    }

    /// Exponential smoothing step: every angle moves `factor` of the way to `target`.
    pub fn approach(&self, target: &JointPose, factor: f32) -> JointPose {
        self.iter()
            .map(|(name, current)| {
                let next = match target.get(name) {
                    Some(goal) => lerp(current, goal, factor),
                    None => current,
                };
                (name.to_string(), next)
            })
            .collect()
    }
}

impl FromIterator<(String, f32)> for JointPose {
    fn from_iter<I: IntoIterator<Item = (String, f32)>>(iter: I) -> Self {
        Self {
            joints: iter.into_iter().collect(),
        }
    }
}
